use crate::bvh::BvhConfig;
use crate::error::{Error, Result};
use std::path::PathBuf;

pub const USAGE: &str = "usage: quantized-bvh <model.obj> [--max-depth N] [--min-leaf N]";

/// Command-line settings for the `quantized-bvh` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: PathBuf,
    pub bvh: BvhConfig,
}

impl Config {
    /// Parses the full argument vector, program name included.
    pub fn parse_args(args: Vec<String>) -> Result<Self> {
        let mut model_path = None;
        let mut bvh = BvhConfig::default();
        let mut args = args.into_iter().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-depth" => bvh.max_depth = parse_number(&arg, args.next())?,
                "--min-leaf" => bvh.min_triangles_per_leaf = parse_number(&arg, args.next())?,
                flag if flag.starts_with("--") => {
                    return Err(Error::InvalidArgument(format!("unknown flag {flag}")))
                }
                _ if model_path.is_none() => model_path = Some(PathBuf::from(&arg)),
                _ => return Err(Error::InvalidArgument(format!("unexpected argument {arg}"))),
            }
        }
        let model_path =
            model_path.ok_or_else(|| Error::InvalidArgument("missing model path".into()))?;
        Ok(Self { model_path, bvh })
    }
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u32> {
    let value = value.ok_or_else(|| Error::InvalidArgument(format!("{flag} needs a value")))?;
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{flag}: not a number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("quantized-bvh")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::parse_args(args(&["model.obj"])).unwrap();
        assert_eq!(config.model_path, PathBuf::from("model.obj"));
        assert_eq!(config.bvh, BvhConfig::default());
    }

    #[test]
    fn flags() {
        let config =
            Config::parse_args(args(&["--max-depth", "12", "m.obj", "--min-leaf", "4"])).unwrap();
        assert_eq!(config.bvh.max_depth, 12);
        assert_eq!(config.bvh.min_triangles_per_leaf, 4);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Config::parse_args(args(&[])).is_err());
        assert!(Config::parse_args(args(&["m.obj", "--max-depth"])).is_err());
        assert!(Config::parse_args(args(&["m.obj", "--max-depth", "deep"])).is_err());
        assert!(Config::parse_args(args(&["m.obj", "--verbose"])).is_err());
        assert!(Config::parse_args(args(&["a.obj", "b.obj"])).is_err());
    }
}
