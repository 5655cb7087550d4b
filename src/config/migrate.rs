use crate::errors::AppResult;
use crate::ui::messages::success;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Keys every config file is expected to carry, with the value written when missing.
pub fn expected_keys() -> Vec<(&'static str, Value)> {
    vec![
        ("timezone", Value::String("Local".to_string())),
        ("default_window", Value::Number(0.into())),
        ("default_view", Value::String("streak".to_string())),
        ("separator_char", Value::String("-".to_string())),
    ]
}

/// Names of the expected keys absent from the YAML document.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let Some(map) = yaml.as_mapping() else {
        return Ok(expected_keys().into_iter().map(|(k, _)| k).collect());
    };

    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::String(k.to_string())))
        .map(|(k, _)| k)
        .collect())
}

/// Add the missing keys to a YAML document, returning the new text and the keys added.
pub fn fill_missing_keys(content: &str) -> AppResult<(String, Vec<&'static str>)> {
    let mut yaml: Value = serde_yaml::from_str(content)?;
    if !yaml.is_mapping() {
        yaml = Value::Mapping(Default::default());
    }

    let mut added = Vec::new();
    if let Some(map) = yaml.as_mapping_mut() {
        for (key, default) in expected_keys() {
            let k = Value::String(key.to_string());
            if !map.contains_key(&k) {
                map.insert(k, default);
                added.push(key);
            }
        }
    }

    let serialized = serde_yaml::to_string(&yaml)?;

    // Inject documentation comment right after the `default_window` line
    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');

        if line.starts_with("default_window:") && added.contains(&"default_window") {
            new_content.push_str(
                "# default_window options (index):\n\
                 #   0 → 1 day, 1 → 3 days, 2 → 7 days, 3 → 15 days\n\
                 #   4 → 30 days, 5 → 60 days, 6 → 100 days, 7 → all data\n",
            );
        }
    }

    Ok((new_content, added))
}

/// Rewrite the config file in place when keys are missing. Returns the keys added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<&'static str>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let (new_content, added) = fill_missing_keys(&content)?;

    if !added.is_empty() {
        fs::write(path, new_content)?;
        success(format!(
            "Config migration applied: added {}",
            added.join(", ")
        ));
    }

    Ok(added)
}
