use std::fmt;
use once_cell::sync::OnceCell;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}


const BANNER: &str = r"
+--------------------------------------------------------------+
|                                                              |
|     H5MD trajectory  ==>  LAMMPS dump  (periodic, centered)  |
|                                                              |
+--------------------------------------------------------------+";


fn built_time() -> &'static str {
    static INSTANCE: OnceCell<String> = OnceCell::new();
    INSTANCE.get_or_init(|| {
        built::util::strptime(built_info::BUILT_TIME_UTC)
            .with_timezone(&built::chrono::offset::Local)
            .to_string()
    })
    .as_str()
}


/// Build metadata shown in `--help`, `--version` and at the top of each log.
#[derive(Debug)]
pub struct Version {
    name:           &'static str,
    version_str:    &'static str,
    authors:        &'static str,
    built_time:     &'static str,
    git_hash_long:  Option<&'static str>,
    git_hash_short: Option<&'static str>,
    git_dirty:      Option<bool>,

    host:           &'static str,
    profile:        &'static str,
    rustc:          &'static str,
    target:         &'static str,
}


impl Version {
    pub fn new() -> Self {
        Self {
            name:           built_info::PKG_NAME,
            version_str:    built_info::PKG_VERSION,
            authors:        built_info::PKG_AUTHORS,
            built_time:     built_time(),
            git_hash_long:  built_info::GIT_COMMIT_HASH,
            git_hash_short: built_info::GIT_COMMIT_HASH_SHORT,
            git_dirty:      built_info::GIT_DIRTY,
            host:           built_info::HOST,
            profile:        built_info::PROFILE,
            rustc:          built_info::RUSTC_VERSION,
            target:         built_info::TARGET,
        }
    }
}


impl Default for Version {
    fn default() -> Self { Self::new() }
}


impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER.trim())?;
        writeln!(f)?;
        writeln!(f, "{} {}", self.name, self.version_str)?;
        writeln!(f, "    git hash:     {}", self.git_hash_short.unwrap_or("NO GIT INFO"))?;
        writeln!(f, "    author(s):    {}", self.authors)?;
        writeln!(f, "    host:         {}", self.host)?;
        writeln!(f, "    built time:   {}", self.built_time)?;

        if f.alternate() {
            if let Some(hash) = self.git_hash_long {
                writeln!(f, "    full hash:    {}{}", hash,
                    if self.git_dirty.unwrap_or(false) { " (dirty)" } else { "" })?;
            }
            writeln!(f, "    profile:      {}", self.profile)?;
            writeln!(f, "    rustc:        {}", self.rustc)?;
            writeln!(f, "    target:       {}", self.target)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let short = Version::new().to_string();
        let long  = format!("{:#}", Version::new());

        assert!(short.contains("h5lammps"));
        assert!(!short.contains("rustc:"));
        assert!(long.contains("rustc:"));
        assert!(long.starts_with(short.lines().next().unwrap()));
    }
}
