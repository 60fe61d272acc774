use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: tri_bvh <mesh.obj> [--out <prefix>] [--quiet]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mesh: PathBuf,
    /// Writes `<prefix>.nodes.bin` and `<prefix>.indices.bin` when set.
    pub out: Option<PathBuf>,
    pub quiet: bool,
}

impl Config {
    /// Parses a full argument vector, program name first.
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let mut mesh = None;
        let mut out = None;
        let mut quiet = false;
        let mut args = args.into_iter().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" | "-o" => match args.next() {
                    Some(prefix) => out = Some(PathBuf::from(prefix)),
                    None => return Err(usage("--out needs a prefix")),
                },
                "--quiet" | "-q" => quiet = true,
                flag if flag.starts_with('-') => {
                    return Err(usage(&format!("unknown flag {flag}")))
                }
                path if mesh.is_none() => mesh = Some(PathBuf::from(path)),
                extra => return Err(usage(&format!("unexpected argument {extra}"))),
            }
        }
        let mesh = mesh.ok_or_else(|| usage("missing mesh path"))?;
        Ok(Self { mesh, out, quiet })
    }

    pub fn nodes_path(&self) -> Option<PathBuf> {
        self.out.as_ref().map(|p| with_suffix(p, ".nodes.bin"))
    }

    pub fn indices_path(&self) -> Option<PathBuf> {
        self.out.as_ref().map(|p| with_suffix(p, ".indices.bin"))
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn usage(reason: &str) -> Error {
    Error::InvalidInput(format!("{reason}\n{USAGE}"))
}
