use curio_core::{default_gallery_path, CounterPlacement};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const USAGE: &str = "\
Usage:
  curio <root> [--counter=after-tag|before-tag]
      Organize loose images under <root> into assets/<category>/ and
      write assets/manifest.json.
  curio gallery <root> [--output=<path>]
      Render the organized tree as a self-contained HTML gallery
      (default <root>/gallery.html).

Options:
  --counter=MODE   Where the collision counter lands relative to an
                   @<tag> resolution marker (default: after-tag).
  --help           Show this help.
  --version        Show the version.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Organize(OrganizeConfig),
    Gallery(GalleryConfig),
}

#[derive(Debug, PartialEq, Eq)]
pub struct OrganizeConfig {
    pub root: PathBuf,
    pub counter: CounterPlacement,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GalleryConfig {
    pub root: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliError {
    MissingRoot,
    InvalidFlag(String),
    InvalidCounterMode(String),
    Help,
    Version,
}

impl Command {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_iter(env::args().skip(1))
    }

    pub fn from_iter<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        match args.next() {
            Some(first) if first == "gallery" => GalleryConfig::parse(args).map(Command::Gallery),
            Some(first) => {
                let mut rest = vec![first];
                rest.extend(args);
                OrganizeConfig::parse(rest.into_iter()).map(Command::Organize)
            }
            None => Err(CliError::MissingRoot),
        }
    }
}

impl OrganizeConfig {
    fn parse<I>(mut args: I) -> Result<Self, CliError>
    where
        I: Iterator<Item = String>,
    {
        let mut root: Option<PathBuf> = None;
        let mut counter = CounterPlacement::default();

        for arg in args.by_ref() {
            if arg.starts_with("--") {
                check_common_flags(&arg)?;
                if let Some(value) = arg.strip_prefix("--root=") {
                    root = Some(PathBuf::from(value));
                    continue;
                }
                if let Some(value) = arg.strip_prefix("--counter=") {
                    counter = parse_counter(value)?;
                    continue;
                }
                return Err(CliError::InvalidFlag(arg));
            }

            if root.is_none() {
                root = Some(PathBuf::from(&arg));
                continue;
            }

            return Err(CliError::InvalidFlag(arg));
        }

        let root = root.ok_or(CliError::MissingRoot)?;
        Ok(Self { root, counter })
    }
}

impl GalleryConfig {
    fn parse<I>(mut args: I) -> Result<Self, CliError>
    where
        I: Iterator<Item = String>,
    {
        let mut root: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;

        for arg in args.by_ref() {
            if arg.starts_with("--") {
                check_common_flags(&arg)?;
                if let Some(value) = arg.strip_prefix("--root=") {
                    root = Some(PathBuf::from(value));
                    continue;
                }
                if let Some(value) = arg.strip_prefix("--output=") {
                    output = Some(PathBuf::from(value));
                    continue;
                }
                return Err(CliError::InvalidFlag(arg));
            }

            if root.is_none() {
                root = Some(PathBuf::from(&arg));
                continue;
            }

            return Err(CliError::InvalidFlag(arg));
        }

        let root = root.ok_or(CliError::MissingRoot)?;
        let output = output.unwrap_or_else(|| default_gallery_path(&root));
        Ok(Self { root, output })
    }
}

fn check_common_flags(arg: &str) -> Result<(), CliError> {
    match arg {
        "--help" => Err(CliError::Help),
        "--version" => Err(CliError::Version),
        _ => Ok(()),
    }
}

fn parse_counter(value: &str) -> Result<CounterPlacement, CliError> {
    match value {
        "after-tag" => Ok(CounterPlacement::AfterTag),
        "before-tag" => Ok(CounterPlacement::BeforeTag),
        other => Err(CliError::InvalidCounterMode(other.to_string())),
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "root directory argument is required\n\n{}", USAGE),
            Self::InvalidFlag(flag) => write!(f, "unrecognized argument: {}", flag),
            Self::InvalidCounterMode(mode) => {
                write!(f, "invalid counter mode: {} (expected after-tag or before-tag)", mode)
            }
            Self::Help => write!(f, "{}", USAGE),
            Self::Version => write!(f, "curio {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_organize_root_only() {
        let command = Command::from_iter(vec![String::from("./images")]).unwrap();
        match command {
            Command::Organize(config) => {
                assert_eq!(config.root, PathBuf::from("./images"));
                assert_eq!(config.counter, CounterPlacement::AfterTag);
            }
            _ => panic!("expected organize command"),
        }
    }

    #[test]
    fn parses_organize_flags() {
        let command = Command::from_iter(vec![
            String::from("--root=./images"),
            String::from("--counter=before-tag"),
        ])
        .unwrap();
        match command {
            Command::Organize(config) => {
                assert_eq!(config.root, PathBuf::from("./images"));
                assert_eq!(config.counter, CounterPlacement::BeforeTag);
            }
            _ => panic!("expected organize command"),
        }
    }

    #[test]
    fn parses_gallery_with_flags() {
        let command = Command::from_iter(vec![
            String::from("gallery"),
            String::from("--root=./images"),
            String::from("--output=./site/index.html"),
        ])
        .unwrap();
        match command {
            Command::Gallery(config) => {
                assert_eq!(config.root, PathBuf::from("./images"));
                assert_eq!(config.output, PathBuf::from("./site/index.html"));
            }
            _ => panic!("expected gallery command"),
        }
    }

    #[test]
    fn gallery_defaults_output_under_root() {
        let command =
            Command::from_iter(vec![String::from("gallery"), String::from("./images")]).unwrap();
        match command {
            Command::Gallery(config) => {
                assert_eq!(config.output, PathBuf::from("./images/gallery.html"));
            }
            _ => panic!("expected gallery command"),
        }
    }

    #[test]
    fn gallery_requires_root() {
        let result = Command::from_iter(vec![String::from("gallery")]);
        assert!(matches!(result, Err(CliError::MissingRoot)));
    }

    #[test]
    fn rejects_unknown_flags_and_counter_modes() {
        let result = Command::from_iter(vec![String::from("./images"), String::from("--bogus")]);
        assert!(matches!(result, Err(CliError::InvalidFlag(_))));

        let result = Command::from_iter(vec![
            String::from("./images"),
            String::from("--counter=middle"),
        ]);
        assert!(matches!(result, Err(CliError::InvalidCounterMode(_))));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert!(matches!(
            Command::from_iter(vec![String::from("--help")]),
            Err(CliError::Help)
        ));
        assert!(matches!(
            Command::from_iter(vec![String::from("gallery"), String::from("--version")]),
            Err(CliError::Version)
        ));
    }
}
