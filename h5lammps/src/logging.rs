use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use shared::{
    Result,
    anyhow::anyhow,
    log::LevelFilter,
};
use log4rs::{
    append::{
        console::{
            ConsoleAppender,
            Target,
        },
        file::FileAppender,
    },
    config::{
        Appender,
        Config,
        Root,
    },
    encode::pattern::PatternEncoder,
    init_config,
    Handle,
};


static HANDLE: OnceCell<Mutex<Handle>> = OnceCell::new();

const ENCODE_STR: &str = "{d(%Y-%m-%d %H:%M:%S)} [{h({l:>5})}] {m}{n}";


fn gen_logger_config(logfile: Option<&Path>) -> Result<Config> {
    let level = LevelFilter::Info;

    let stderr = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(ENCODE_STR)))
        .target(Target::Stderr)
        .build();

    let builder = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)));
    let root = Root::builder().appender("stderr");

    let (builder, root) = if let Some(path) = logfile {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(ENCODE_STR)))
            .append(false)
            .build(path)?;
        (builder.appender(Appender::builder().build("logfile", Box::new(file))),
         root.appender("logfile"))
    } else {
        (builder, root)
    };

    Ok(builder.build(root.build(level))?)
}


/// Install the global logger writing to stderr. Calling it again is a no-op.
pub fn logger_init() -> Result<()> {
    HANDLE.get_or_try_init(|| -> Result<Mutex<Handle>> {
        let handle = init_config(gen_logger_config(None)?)?;
        Ok(Mutex::new(handle))
    })?;
    Ok(())
}


/// Additionally send the log to `path`, truncating it.
pub fn logger_redirect(path: impl AsRef<Path>) -> Result<()> {
    logger_init()?;
    let config = gen_logger_config(Some(path.as_ref()))?;
    HANDLE.get()
        .ok_or_else(|| anyhow!("Logger is not initialized."))?
        .lock()
        .map_err(|_| anyhow!("Logger handle is poisoned."))?
        .set_config(config);
    Ok(())
}
