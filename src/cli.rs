// Command-line options. Small enough that a hand-written parser reads better
// than a dependency.

use crate::error::Error;
use crate::icon::DEFAULT_SIZE;
use crate::style::{IconStyle, Preset};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: mic-icon [OPTIONS]

Draws the microphone app icon and writes icon.png plus icon_256.png.

Options:
  -o, --out DIR       output directory (default: .)
  -s, --size N        full-resolution size in pixels, 64..=16384 (default: 512)
  -p, --preset NAME   studio | signal (default: studio)
      --style FILE    TOML style file; overrides --preset
      --dump-style    print the selected style as TOML and exit
      --preview       show the icon in a window instead of writing files
  -v, --verbose       debug logging
  -h, --help          print this help";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub out_dir: PathBuf,
    pub size: u32,
    pub preset: Preset,
    pub style_path: Option<PathBuf>,
    pub dump_style: bool,
    pub preview: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            size: DEFAULT_SIZE,
            preset: Preset::default(),
            style_path: None,
            dump_style: false,
            preview: false,
            verbose: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse arguments (program name already stripped).
    pub fn parse<I, S>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut opts = Options::default();
        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            // Accept both "--flag value" and "--flag=value".
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| Error::Usage(format!("{name} needs a value")))
            };
            match flag.as_str() {
                "-o" | "--out" => opts.out_dir = PathBuf::from(value("--out")?),
                "-s" | "--size" => {
                    let raw = value("--size")?;
                    opts.size = raw
                        .parse()
                        .map_err(|_| Error::Usage(format!("--size expects a positive integer, got `{raw}`")))?;
                }
                "-p" | "--preset" => opts.preset = value("--preset")?.parse()?,
                "--style" => opts.style_path = Some(PathBuf::from(value("--style")?)),
                "--dump-style" => opts.dump_style = true,
                "--preview" => opts.preview = true,
                "-v" | "--verbose" => opts.verbose = true,
                "-h" | "--help" => opts.help = true,
                other => return Err(Error::Usage(format!("unknown argument `{other}`"))),
            }
        }
        Ok(opts)
    }

    /// The style file if one was given, else the preset.
    pub fn style(&self) -> Result<IconStyle, Error> {
        match &self.style_path {
            Some(path) => IconStyle::load(path),
            None => Ok(self.preset.style()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{MAX_SIZE, MIN_SIZE};

    #[test]
    fn no_arguments_gives_defaults() {
        let opts = Options::parse(Vec::<String>::new()).unwrap();
        assert_eq!(opts, Options::default());
        assert_eq!(opts.size, 512);
        assert_eq!(opts.style().unwrap(), IconStyle::studio());
    }

    #[test]
    fn parses_all_flags() {
        let opts = Options::parse([
            "--out", "build/icons", "-s", "1024", "--preset=signal", "--preview", "-v",
        ])
        .unwrap();
        assert_eq!(opts.out_dir, PathBuf::from("build/icons"));
        assert_eq!(opts.size, 1024);
        assert_eq!(opts.preset, Preset::Signal);
        assert!(opts.preview && opts.verbose);
        assert!(!opts.dump_style);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        for args in [vec!["--size"], vec!["--size", "big"], vec!["--size", "-3"], vec!["--frobnicate"]] {
            assert!(matches!(Options::parse(args), Err(Error::Usage(_))));
        }
        assert!(matches!(Options::parse(["--preset", "neon"]), Err(Error::Usage(_))));
    }

    #[test]
    fn help_text_states_the_size_range() {
        assert!(USAGE.contains(&format!("{MIN_SIZE}..={MAX_SIZE}")));
    }

    #[test]
    fn style_file_overrides_preset() {
        let path = std::env::temp_dir().join(format!("mic-icon-style-{}.toml", std::process::id()));
        std::fs::write(&path, IconStyle::signal().to_toml().unwrap()).unwrap();
        let opts = Options::parse(["--preset".to_string(), "studio".into(), "--style".into(), path.display().to_string()])
            .unwrap();
        assert_eq!(opts.style().unwrap(), IconStyle::signal());
        std::fs::remove_file(&path).unwrap();
    }
}
