use hbadmin::{AdminConfig, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConfigInfo<'a> {
    config_file: String,
    #[serde(flatten)]
    config: &'a AdminConfig,
}

pub fn run(config: &AdminConfig, config_file: Option<String>, output_format: OutputFormat) {
    let info = ConfigInfo {
        config_file: config_file.unwrap_or_else(AdminConfig::config_file_path),
        config,
    };

    if output_format.is_json() {
        match output_format.to_json(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
        return;
    }

    println!("Config File:        {}", info.config_file);
    println!("{}", config.summary());
}
