use op2aws_core::COMMAND_ROOT;
use std::env;
use std::path::PathBuf;

/// XDG Base Directory paths for op2aws
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_CACHE_HOME/op2aws or fallback
    pub fn cache_dir() -> PathBuf {
        env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".cache"))
                    .unwrap_or_else(|| PathBuf::from(".cache"))
            })
            .join(COMMAND_ROOT)
    }

    /// The shared AWS config file, `~/.aws/config`
    pub fn aws_config_file() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".aws"))
            .unwrap_or_else(|| PathBuf::from(".aws"))
            .join("config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cache_dir_with_env() {
        let cache_orig = env::var("XDG_CACHE_HOME").ok();

        env::set_var("XDG_CACHE_HOME", "/tmp/cache");

        assert_eq!(XdgPaths::cache_dir(), PathBuf::from("/tmp/cache/op2aws"));

        match cache_orig {
            Some(val) => env::set_var("XDG_CACHE_HOME", val),
            None => env::remove_var("XDG_CACHE_HOME"),
        }
    }

    #[test]
    fn test_aws_config_file() {
        let path = XdgPaths::aws_config_file();
        assert!(path.ends_with(".aws/config"));
    }
}
