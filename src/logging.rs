/*
 * Optional diagnostics. The shim runs inside someone else's process and has no
 * console, so nothing is logged unless `UNITY_DARKMODE_LOG` is set when the
 * module attaches. Its value is an `env_logger` filter (e.g. `debug` or
 * `unity_editor_darkmode=trace`) and records go to `<module-filename>.log`
 * next to the module.
 */

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Target};

pub const LOG_FILTER_ENV: &str = "UNITY_DARKMODE_LOG";

pub fn log_path_for_module(module_path: &Path) -> PathBuf {
    let mut path = OsString::from(module_path.as_os_str());
    path.push(".log");
    PathBuf::from(path)
}

/// Installs the file logger when a filter is configured. Returns whether a
/// logger was installed by this call.
pub fn init_file_logger(module_path: &Path) -> bool {
    match std::env::var(LOG_FILTER_ENV) {
        Ok(filter) if !filter.trim().is_empty() => {
            init_file_logger_with_filter(&log_path_for_module(module_path), &filter)
        }
        _ => false,
    }
}

fn init_file_logger_with_filter(log_path: &Path, filter: &str) -> bool {
    let file = match File::create(log_path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let installed = Builder::new()
        .parse_filters(filter)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logging: writing to {}", log_path.display());
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_sits_next_to_the_module() {
        assert_eq!(
            log_path_for_module(Path::new("C:/Unity/Editor/UnityEditorDarkMode.dll")),
            PathBuf::from("C:/Unity/Editor/UnityEditorDarkMode.dll.log")
        );
    }

    #[test]
    fn logger_creation_fails_quietly_for_unwritable_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("shim.dll.log");
        assert!(!init_file_logger_with_filter(&missing, "debug"));
        assert!(!missing.exists());
    }
}
