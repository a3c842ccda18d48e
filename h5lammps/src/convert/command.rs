use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use shared::Result;
use crate::OptProcess;

use crate::core::TomlConfig;
use crate::convert;
use crate::logging::logger_redirect;


#[derive(Debug, Parser)]
/// Convert particle positions of an H5MD trajectory into a LAMMPS dump.
///
/// Positions are wrapped into the box centered at the origin before being written.
pub struct ConvertCommand {
    #[arg(short, long, required_unless_present_any=["config", "generate"])]
    /// H5MD file to read positions from.
    input: Option<PathBuf>,

    #[arg(short, long, required_unless_present_any=["config", "generate"])]
    /// LAMMPS dump file to write, overwritten if it exists.
    output: Option<PathBuf>,

    #[arg(long, num_args=2, value_names=["START", "END"], allow_negative_numbers=true)]
    /// Range of frames to convert, END is exclusive.
    ///
    /// END = -1 converts till the last stored frame. Default: `0 -1`.
    ///
    /// An explicit END beyond the stored frames is allowed: the missing frames
    /// are skipped with a warning. With END = -1, a START beyond the stored
    /// frames is an error, since START would exceed the resolved END.
    range: Option<Vec<i64>>,

    #[arg(long, value_parser=clap::value_parser!(u64).range(1..))]
    /// Convert every N-th frame of the range. Default: 1.
    every: Option<u64>,

    #[arg(short, long)]
    /// Particle group under `/particles` to read. Default: "fluid".
    group: Option<String>,

    #[arg(short='c', long, aliases=["cfg", "conf"])]
    /// Config file name. Options given on the command line take precedence.
    ///
    /// Aliases: "cfg", "conf".
    config: Option<PathBuf>,

    #[arg(long)]
    /// Also write the log to this file.
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, alias="gen")]
    /// Generate auxiliary files instead of converting.
    ///
    /// Alias: "gen".
    generate: Option<TemplateGenerator>,
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum TemplateGenerator {
    #[value(aliases=["config", "cfg", "conf"])]
    /// Generate config template for trajectory conversion. Aliases: "config", "cfg", "conf".
    ConfigTemplate,
}


impl ConvertCommand {
    /// Merge the config file (if any) with the options given on the command line.
    fn build_config(&self) -> Result<convert::ConvertConfig> {
        let mut cfg = match self.config.as_ref() {
            Some(fname) => convert::ConvertConfig::from_file(fname)?,
            None => convert::ConvertConfig::default(),
        };

        if let Some(input) = self.input.as_ref() {
            cfg.set_input(input.clone());
        }
        if let Some(output) = self.output.as_ref() {
            cfg.set_output(output.clone());
        }
        if let Some(range) = self.range.as_ref() {
            cfg.set_range([range[0], range[1]]);
        }
        if let Some(every) = self.every {
            cfg.set_every(every as usize);
        }
        if let Some(group) = self.group.as_ref() {
            cfg.set_group(group.clone());
        }
        if let Some(log_file) = self.log_file.as_ref() {
            cfg.set_log_file(log_file.clone());
        }

        Ok(cfg)
    }
}


impl OptProcess for ConvertCommand {
    fn process(&self) -> Result<()> {
        use TemplateGenerator::*;

        if let Some(g) = self.generate {
            return match g {
                ConfigTemplate => convert::ConvertConfig::default().to_file("h5lammps_config_template.toml"),
            }
        }

        let cfg = self.build_config()?;
        if let Some(log_file) = cfg.get_log_file() {
            logger_redirect(log_file)?;
        }
        cfg.check_config()?;
        cfg.print_to_log();

        convert::run(&cfg)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal() {
        let cmd = ConvertCommand::try_parse_from(["h5_to_lammps", "--input", "a.h5", "--output", "a.dump"]).unwrap();
        let cfg = cmd.build_config().unwrap();

        let expect = convert::ConvertConfig::new("a.h5".into(), "a.dump".into());
        assert_eq!(cfg, expect);
    }

    #[test]
    fn test_parse_range_every() {
        let cmd = ConvertCommand::try_parse_from([
            "h5_to_lammps", "-i", "a.h5", "-o", "a.dump", "--range", "10", "-1", "--every", "5", "-g", "solvent",
        ]).unwrap();
        let cfg = cmd.build_config().unwrap();

        assert_eq!(cfg.get_range(), [10, -1]);
        assert_eq!(cfg.get_every(), 5);
        assert_eq!(cfg.get_group(), "solvent");
        assert_eq!(cfg.frame_range().unwrap(),
                   shared::FrameRange { start: 10, end: None, every: 5 });
    }

    #[test]
    fn test_parse_rejects() {
        assert!(ConvertCommand::try_parse_from(["h5_to_lammps", "--output", "a.dump"]).is_err());
        assert!(ConvertCommand::try_parse_from(["h5_to_lammps", "-i", "a.h5", "-o", "a.dump", "--every", "0"]).is_err());
        assert!(ConvertCommand::try_parse_from(["h5_to_lammps", "-i", "a.h5", "-o", "a.dump", "--range", "3"]).is_err());
    }

    #[test]
    fn test_range_help_explains_past_end() {
        use clap::CommandFactory;

        let cmd = ConvertCommand::command();
        let range = cmd.get_arguments()
            .find(|a| a.get_id() == "range")
            .unwrap();
        let help = range.get_long_help().unwrap().to_string();
        assert!(help.contains("skipped with a warning"));
        assert!(help.contains("START beyond the stored"));
    }

    #[test]
    fn test_generate_without_paths() {
        let cmd = ConvertCommand::try_parse_from(["h5_to_lammps", "--gen", "cfg"]).unwrap();
        assert_eq!(cmd.generate, Some(TemplateGenerator::ConfigTemplate));
    }

    #[test]
    fn test_config_overridden_by_flags() {
        let dir = tempdir().unwrap();
        let fname = dir.path().join("convert.toml");
        std::fs::write(&fname, r#"
        input = "from_file.h5"
        output = "from_file.lammpstrj"
        range = [0, 50]
        every = 10
        "#).unwrap();

        let fname_str = fname.to_str().unwrap();
        let cmd = ConvertCommand::try_parse_from(["h5_to_lammps", "-c", fname_str, "--every", "2"]).unwrap();
        let cfg = cmd.build_config().unwrap();

        assert_eq!(cfg.get_input(), &PathBuf::from("from_file.h5"));
        assert_eq!(cfg.get_range(), [0, 50]);
        assert_eq!(cfg.get_every(), 2);
    }
}
