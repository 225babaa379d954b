//! Exit handling: signal handlers, terminal restore, and graceful shutdown.

/// Put the tty back into cooked mode with echo.
pub fn reset_terminal() {
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(0, &mut termios) == 0 {
            termios.c_oflag |= libc::OPOST | libc::ONLCR;
            termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
            libc::tcsetattr(0, libc::TCSANOW, &termios);
        }
    }
}

/// Registered with atexit; runs on every normal exit and after a signal.
extern "C" fn cleanup_on_exit() {
    reset_terminal();
    unsafe {
        // Only emit escape codes to a real terminal.
        if libc::isatty(1) == 1 {
            const RESTORE: &[u8] = b"\x1b[0m\x1b[?25h";
            libc::write(1, RESTORE.as_ptr() as *const libc::c_void, RESTORE.len());
        }
    }
}

/// SIGINT/SIGTERM/SIGHUP: leave through `exit` so atexit restores the tty.
extern "C" fn signal_handler(_: libc::c_int) {
    unsafe { libc::exit(130) }
}

/// SIGSEGV/SIGABRT: restore the tty, then re-raise with the default action.
extern "C" fn crash_handler(sig: libc::c_int) {
    reset_terminal();
    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

/// Call early in `main`.
pub fn install_handlers() {
    let exit = signal_handler as *const () as libc::sighandler_t;
    let crash = crash_handler as *const () as libc::sighandler_t;
    unsafe {
        libc::atexit(cleanup_on_exit);
        for sig in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
            libc::signal(sig, exit);
        }
        for sig in [libc::SIGSEGV, libc::SIGABRT] {
            libc::signal(sig, crash);
        }
    }
}
