//! `/dev/urandom` backed source.

use std::fs::File;
use std::io::{self, BufReader, Read};

use tracing::warn;
use zeroize::Zeroize;

use super::{RandomSource, hw};

pub const PATH: &str = "/dev/urandom";

pub fn is_available() -> bool {
    std::path::Path::new(PATH).exists()
}

pub struct UrandomRng {
    reader: BufReader<File>,
}

impl UrandomRng {
    pub fn open() -> io::Result<Self> {
        Ok(Self {
            reader: BufReader::with_capacity(4096, File::open(PATH)?),
        })
    }
}

impl RandomSource for UrandomRng {
    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        let value = match self.reader.read_exact(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(e) => {
                warn!(error = %e, "read from {PATH} failed, using hardware entropy");
                hw::entropy()
            }
        };
        buf.zeroize();
        value
    }
}
