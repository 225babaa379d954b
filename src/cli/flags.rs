#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Generate,
    Info,
    Simulate,
    Check,
}

#[derive(Debug, Default)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub urandom: bool,
    pub clipboard: bool,
    pub saved: bool,
    pub mode: Mode,
    pub no_upper: bool,
    pub no_lower: bool,
    pub no_digits: bool,
    pub no_special: bool,
    pub special: Option<String>,
    pub length: Option<usize>,
    pub number: Option<usize>,
    pub target: Option<String>,
    /// Password to rate; `-` reads it from stdin.
    pub check: Option<String>,
    pub rate: Option<f64>,
    pub sim_rate: Option<f64>,
    pub pace: Option<u64>,
    pub interval: Option<u64>,
}
