use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `zbmessenger.toml` in the working directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(CONFIG_FILE_NAME));

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_writes_loadable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = dir.join("custom.toml");

        let mut host = TestHost::default();
        init_config(&mut host, &InitArgs { output: Some(path.clone()) }).unwrap();

        assert!(host.output_str().contains("custom.toml"));
        assert_eq!(Config::load(&dir, Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_init_unwritable_path() {
        let mut host = TestHost::default();
        let args = InitArgs {
            output: Some("/nonexistent/dir/zbmessenger.toml".into()),
        };

        assert!(init_config(&mut host, &args).is_err());
    }
}
