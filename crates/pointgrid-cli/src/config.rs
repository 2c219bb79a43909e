//! Runner configuration from a JSON file and environment variables.

use std::path::Path;
use std::str::FromStr;

use eyre::WrapErr;
use pointgrid::AlignOptions;

/// Names a JSON file with [`AlignOptions`] fields.
pub const CONFIG_VAR: &str = "POINTGRID_CONFIG";

/// Load options: defaults, then the `POINTGRID_CONFIG` file, then individual
/// `POINTGRID_*` variables.
pub fn load() -> eyre::Result<AlignOptions> {
    load_from(|key| std::env::var(key).ok())
}

pub(crate) fn load_from(var: impl Fn(&str) -> Option<String>) -> eyre::Result<AlignOptions> {
    let mut options = match var(CONFIG_VAR) {
        Some(path) => read_file(Path::new(&path))?,
        None => AlignOptions::default(),
    };

    if let Some(fill) = parsed(&var, "POINTGRID_FILL")? {
        options.fill = fill;
    }
    if let Some(pad) = parsed(&var, "POINTGRID_PAD")? {
        options.pad = pad;
    }
    if let Some(optimal) = parsed(&var, "POINTGRID_OPTIMAL")? {
        options.optimal = optimal;
    }
    if let Some(every) = parsed(&var, "POINTGRID_LOG_EVERY")? {
        options.log_every = Some(every);
    }
    if let Some(seed) = parsed(&var, "POINTGRID_SEED")? {
        options.seed = Some(seed);
    }

    Ok(options)
}

fn read_file(path: &Path) -> eyre::Result<AlignOptions> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))
}

fn parsed<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .wrap_err_with(|| format!("{key}={raw:?} is not valid"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(load_from(env(&[])).unwrap(), AlignOptions::default());
    }

    #[test]
    fn test_env_overrides() {
        let options = load_from(env(&[
            ("POINTGRID_FILL", "0.5"),
            ("POINTGRID_PAD", " 0.1 "),
            ("POINTGRID_OPTIMAL", "true"),
            ("POINTGRID_LOG_EVERY", "100"),
            ("POINTGRID_SEED", "7"),
        ]))
        .unwrap();

        assert_eq!(
            options,
            AlignOptions::default()
                .with_fill(0.5)
                .with_pad(0.1)
                .with_optimal(true)
                .with_log_every(100)
                .with_seed(7)
        );
    }

    #[test]
    fn test_bad_value_names_the_variable() {
        let err = load_from(env(&[("POINTGRID_FILL", "lots")])).unwrap_err();
        assert!(format!("{err}").contains("POINTGRID_FILL"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_from(env(&[(CONFIG_VAR, "/nonexistent/pointgrid.json")])).unwrap_err();
        assert!(format!("{err}").contains("reading config"));
    }
}
