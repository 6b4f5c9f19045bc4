use bitflags::bitflags;

bitflags! {
    /// Unix permission bits carried by a header's mode field
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Mode: u32 {
        const SETUID = 0o4000;
        const SETGID = 0o2000;
        const STICKY = 0o1000;

        const USER_READ = 0o400;
        const USER_WRITE = 0o200;
        const USER_EXEC = 0o100;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const OTHER_READ = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC = 0o001;
    }
}

impl Mode {
    /// Some writers store the file type bits (`0o100644`) in the mode field
    /// as well; only the twelve permission bits are kept.
    pub fn from_header(mode: u64) -> Mode {
        Mode::from_bits_truncate((mode & 0o7777) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn strips_type_bits() {
        assert_eq!(Mode::from_header(0o100644).bits(), 0o644);
        assert_eq!(Mode::from_header(0o40755).bits(), 0o755);
    }

    #[test]
    fn keeps_special_bits() {
        let mode = Mode::from_header(0o4755);
        assert!(mode.contains(Mode::SETUID | Mode::USER_EXEC));
        assert_eq!(mode.bits(), 0o4755);
    }
}
