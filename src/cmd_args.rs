use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile section to read from the profile file. Default is 'default'.
    /// If the profile is not configured, built-in defaults are used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Server override
    /// Optional. Base URL of the calculation service, overriding the profile.
    #[clap(short = 's', long, help = "calculation service base URL")]
    server: Option<String>,

    /// Verbose mode
    /// Optional. Log at debug level.
    #[clap(
        short = 'v',
        long,
        help = "Log verbose messages",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            verbose: args.verbose,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert_eq!(args.server(), None);
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_server_override() {
        let args = CommandLineArgs::parse_from(["program", "--server", "http://calc:8081"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(args.server(), Some("http://calc:8081"));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-s", "http://x", "-v"]);
        assert_eq!(args.profile(), "dev");
        assert_eq!(args.server(), Some("http://x"));
        assert!(args.verbose());
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(args.server(), None);
        assert!(!args.verbose());
    }
}
