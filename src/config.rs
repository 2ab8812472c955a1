use std::path::PathBuf;

use clap::Parser;

use crate::chart::LegendMode;
use crate::data::loader::{DEFAULT_INPUT, LoadOptions};
use crate::data::transpose::RaggedPolicy;
use crate::render::Viewport;

/// Plot every column of a delimited numeric file as a line curve.
#[derive(Parser, Debug, Clone)]
#[command(name = "curve-viewer", version, about)]
pub struct Opt {
    /// Input file: one row per line, numeric fields, no header
    #[arg(env = "CURVES_CSV", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// What to do with rows of unequal length
    #[arg(long, value_enum, default_value_t = RaggedPolicy::Truncate)]
    pub ragged: RaggedPolicy,

    /// How series are named in the legend
    #[arg(long, value_enum, default_value_t = LegendMode::PerCurve)]
    pub legend: LegendMode,

    /// Write the chart to this PNG instead of opening a window
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// PNG written when no display is available
    #[arg(long)]
    pub fallback_output: Option<PathBuf>,

    /// Window / image width in pixels
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window / image height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
}

impl Opt {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            ragged: self.ragged,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_plain_script() {
        let opt = Opt::try_parse_from(["curve-viewer", "curves.csv"]).unwrap();
        assert_eq!(opt.input, PathBuf::from("curves.csv"));
        assert_eq!(opt.load_options(), LoadOptions::default());
        assert_eq!(opt.legend, LegendMode::PerCurve);
        assert!(opt.output.is_none());
        assert_eq!(
            opt.viewport(),
            Viewport {
                width: 1000,
                height: 600
            }
        );
    }

    #[test]
    fn flags_are_parsed() {
        let opt = Opt::try_parse_from([
            "curve-viewer",
            "data.txt",
            "-d",
            ";",
            "--ragged",
            "fail",
            "--legend",
            "fixed",
            "-o",
            "out.png",
            "--width",
            "640",
        ])
        .unwrap();
        assert_eq!(opt.input, PathBuf::from("data.txt"));
        assert_eq!(opt.delimiter, b';');
        assert_eq!(opt.ragged, RaggedPolicy::Fail);
        assert_eq!(opt.legend, LegendMode::Fixed);
        assert_eq!(opt.output, Some(PathBuf::from("out.png")));
        assert_eq!(opt.width, 640);
    }

    #[test]
    fn delimiter_must_be_one_ascii_char() {
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn zero_sized_viewport_is_rejected() {
        for flag in ["--width", "--height"] {
            let parsed = Opt::try_parse_from(["curve-viewer", flag, "0"]);
            assert!(parsed.is_err(), "{flag} 0 was accepted");
        }
        let opt = Opt::try_parse_from(["curve-viewer", "--width", "1", "--height", "1"]).unwrap();
        assert_eq!(
            opt.viewport(),
            Viewport {
                width: 1,
                height: 1
            }
        );
    }
}
