//tabfolders/src/main.rs
use std::path::PathBuf;
use std::{env, io};

use tabfolders::kernel::services::adapters::load_settings_or_default;
use tabfolders::kernel::services::ports::FolderSettings;
use tabfolders::replay::{run_script, Script};

mod logging;

fn usage() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "usage: tabfolders <script.json> [--settings <settings.json>]",
    )
}

fn main() -> io::Result<()> {
    let logging = logging::init();
    if let Some(guard) = &logging {
        tracing::debug!(log_dir = %guard.log_dir().display(), "replay logging ready");
    }

    let mut args = env::args().skip(1);
    let mut script_path: Option<PathBuf> = None;
    let mut settings_path: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings_path = Some(args.next().ok_or_else(usage)?.into()),
            _ if script_path.is_none() => script_path = Some(arg.into()),
            _ => return Err(usage()),
        }
    }
    let script_path = script_path.ok_or_else(usage)?;

    let settings = settings_path
        .as_deref()
        .map(load_settings_or_default)
        .unwrap_or_else(FolderSettings::default);

    let data = std::fs::read_to_string(&script_path)?;
    let script: Script = serde_json::from_str(&data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut session = run_script(&script, settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    print!("{}", session.outline());
    session.shutdown();
    Ok(())
}
