//! Command-line flags shared by modeling programs.

/// Flags accepted by modeling programs.
///
/// The only recognized flag is `-nopopup`, which suppresses the interactive
/// viewer after the mesh is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunArgs {
    /// Open the viewer when the program is done.
    pub popup: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self { popup: true }
    }
}

impl RunArgs {
    /// Parses the arguments of the current process (without the program name).
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Parses a list of arguments. Unknown arguments are ignored with a warning.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_ref() {
                "-nopopup" => parsed.popup = false,
                other => log::warn!("ignoring unknown argument '{other}'"),
            }
        }
        parsed
    }
}
