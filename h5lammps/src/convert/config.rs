use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml;
use shared::{
    log,
    ensure,
    Context,
    FrameRange,
    Result,
};

use crate::constants::{
    DEFAULT_GROUP,
    PROGRESS_EVERY,
};
use crate::core::TomlConfig;


#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    input:  PathBuf,
    output: PathBuf,

    // `[start, end]`, `end` is exclusive and `-1` means till the last stored frame.
    #[serde(default = "ConvertConfig::default_range")]
    range: [i64; 2],

    #[serde(default = "ConvertConfig::default_every")]
    every: usize,

    // Particle group under `/particles` in the H5MD file.
    #[serde(default = "ConvertConfig::default_group")]
    group: String,

    #[serde(default = "ConvertConfig::default_progress_every")]
    progress_every: usize,

    log_file: Option<PathBuf>,
}


impl ConvertConfig {
    fn default_range() -> [i64; 2] { [0, -1] }
    fn default_every() -> usize { 1 }
    fn default_group() -> String { DEFAULT_GROUP.to_string() }
    fn default_progress_every() -> usize { PROGRESS_EVERY }

    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self { input, output, ..Default::default() }
    }

    pub fn get_input(&self) -> &PathBuf { &self.input }
    pub fn get_output(&self) -> &PathBuf { &self.output }
    pub fn get_range(&self) -> [i64; 2] { self.range }
    pub fn get_every(&self) -> usize { self.every }
    pub fn get_group(&self) -> &str { &self.group }
    pub fn get_progress_every(&self) -> usize { self.progress_every }
    pub fn get_log_file(&self) -> Option<&PathBuf> { self.log_file.as_ref() }

    pub fn set_input(&mut self, input: PathBuf) { self.input = input; }
    pub fn set_output(&mut self, output: PathBuf) { self.output = output; }
    pub fn set_range(&mut self, range: [i64; 2]) { self.range = range; }
    pub fn set_every(&mut self, every: usize) { self.every = every; }
    pub fn set_group(&mut self, group: String) { self.group = group; }
    pub fn set_log_file(&mut self, log_file: PathBuf) { self.log_file = Some(log_file); }

    pub fn frame_range(&self) -> Result<FrameRange> {
        FrameRange::from_sentinel(self.range, self.every)
    }

    pub fn check_config(&self) -> Result<()> {
        ensure!(!self.input.as_os_str().is_empty(), "Field 'input' cannot be empty.");
        ensure!(self.input.is_file(), "Field 'input' does not point to a valid file: {:?}.", self.input);
        ensure!(!self.output.as_os_str().is_empty(), "Field 'output' cannot be empty.");
        ensure!(self.input != self.output, "Fields 'input' and 'output' point to the same file.");
        ensure!(!self.group.is_empty() && !self.group.contains('/'),
            "Field 'group' must be a plain group name under /particles, got {:?}.", self.group);
        ensure!(self.progress_every >= 1, "Field 'progress_every' must be at least 1.");
        self.frame_range().context("Invalid 'range' or 'every'.")?;

        if self.output.is_file() {
            log::warn!("Field 'output' points to an existing file {:?} and it will be overwritten.", self.output);
        }

        Ok(())
    }

    pub fn print_to_log(&self) {
        let input_print = format!("{}", self);
        let hashtag_line = "#".repeat(80);
        log::info!("Config loaded. The formatted config is:\n\n{hashtag_line}\n{}\n{hashtag_line}\n", input_print);
    }
}


impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trajectory.h5"),
            output: PathBuf::from("trajectory.lammpstrj"),
            range: Self::default_range(),
            every: Self::default_every(),
            group: Self::default_group(),
            progress_every: Self::default_progress_every(),
            log_file: None,
        }
    }
}


impl fmt::Display for ConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# h5lammps config for converting H5MD trajectory to LAMMPS dump")?;
        writeln!(f)?;

        writeln!(f, " {:>16} = {:?}", "input",  self.input)?;
        writeln!(f, " {:>16} = {:?}", "output", self.output)?;
        writeln!(f, " {:>16} = {:?} # [start, end), end = -1 means the last frame", "range", self.range)?;
        writeln!(f, " {:>16} = {}",   "every",  self.every)?;
        writeln!(f, " {:>16} = {:?}", "group",  self.group)?;
        writeln!(f, " {:>16} = {}",   "progress_every", self.progress_every)?;

        if let Some(log_file) = self.log_file.as_ref() {
            writeln!(f, " {:>16} = {:?}", "log_file", log_file)?;
        } else {
            writeln!(f, "#{:>16} = \"convert.log\"", "log_file")?;
        }

        Ok(())
    }
}


impl TomlConfig for ConvertConfig {
    fn from_file<P>(fname: P) -> Result<Self>
    where P: AsRef<Path> {
        ensure!(fname.as_ref().is_file(), "Config file {:?} for ConvertConfig not available.", fname.as_ref());
        let raw = fs::read_to_string(&fname)?;
        let cfg = toml::from_str::<Self>(&raw)
            .with_context(|| format!("Failed to parse {:?} as ConvertConfig.", fname.as_ref()))?;
        Ok(cfg)
    }

    fn to_file<P>(&self, fname: P) -> Result<()>
    where P: AsRef<Path> {
        if fname.as_ref().is_file() {
            log::warn!("File {:?} exists, overwriting ...", fname.as_ref());
        }
        log::info!("Writing config to file {:?}", fname.as_ref());
        fs::write(fname.as_ref(), self.to_string())?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize() {
        let txt = r#"
        input = "run/traj.h5"
        output = "run/traj.lammpstrj"
        range = [10, 200]
        every = 5
        group = "solvent"
        progress_every = 20
        log_file = "convert.log"
        "#;

        let actual_cfg: ConvertConfig = toml::from_str(txt).unwrap();
        let expect_cfg = ConvertConfig {
            input: PathBuf::from("run/traj.h5"),
            output: PathBuf::from("run/traj.lammpstrj"),
            range: [10, 200],
            every: 5,
            group: "solvent".to_string(),
            progress_every: 20,
            log_file: Some(PathBuf::from("convert.log")),
        };

        assert_eq!(expect_cfg, actual_cfg);
    }

    #[test]
    fn test_deserialize_defaults() {
        let txt = r#"
        input = "traj.h5"
        output = "traj.lammpstrj"
        "#;

        let cfg: ConvertConfig = toml::from_str(txt).unwrap();
        assert_eq!(cfg, ConvertConfig::new("traj.h5".into(), "traj.lammpstrj".into()));
        assert_eq!(cfg.frame_range().unwrap(), FrameRange::default());
    }

    #[test]
    fn test_deserialize_unknown_field() {
        let txt = r#"
        input = "traj.h5"
        output = "traj.lammpstrj"
        stride = 2
        "#;
        assert!(toml::from_str::<ConvertConfig>(txt).is_err());
    }

    #[test]
    fn test_template_parses_back() {
        let cfg = ConvertConfig::default();
        let parsed: ConvertConfig = toml::from_str(&cfg.to_string()).unwrap();
        assert_eq!(cfg, parsed);

        let mut cfg = ConvertConfig::default();
        cfg.set_log_file("convert.log".into());
        cfg.set_range([3, 9]);
        let parsed: ConvertConfig = toml::from_str(&cfg.to_string()).unwrap();
        assert_eq!(cfg, parsed);
    }

    #[test]
    fn test_file_io() {
        let dir = tempdir().unwrap();
        let fname = dir.path().join("config.toml");

        let mut cfg = ConvertConfig::default();
        cfg.set_every(4);
        cfg.to_file(&fname).unwrap();
        assert_eq!(ConvertConfig::from_file(&fname).unwrap(), cfg);

        assert!(ConvertConfig::from_file(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_check_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("traj.h5");
        fs::write(&input, b"").unwrap();
        let output = dir.path().join("traj.lammpstrj");

        let cfg = ConvertConfig::new(input.clone(), output.clone());
        assert!(cfg.check_config().is_ok());

        let mut bad = cfg.clone();
        bad.set_every(0);
        assert!(bad.check_config().is_err());

        let mut bad = cfg.clone();
        bad.set_range([-3, -1]);
        assert!(bad.check_config().is_err());

        let mut bad = cfg.clone();
        bad.set_group("fluid/position".into());
        assert!(bad.check_config().is_err());

        let mut bad = cfg.clone();
        bad.set_output(input.clone());
        assert!(bad.check_config().is_err());

        let bad = ConvertConfig::new(dir.path().join("nope.h5"), output);
        assert!(bad.check_config().is_err());
    }
}
