use lesson_admin::settings::*;

fn main() {
    // Load settings from the default location
    match parse_settings(None) {
        Ok(settings) => println!("Loaded settings: {:?}", settings),
        Err(e) => println!("Default settings rejected: {}", e),
    }

    // A missing file leaves required keys unset (expected to fail)
    let is_err = parse_settings(Some("settings/missing.toml")).is_err();
    println!("Error on missing file: {:?}", is_err);

    // Environment variables override the file
    // $ LESSON_ADMIN__API__URL=http://localhost:9000 cargo run --bin settings_demo -- --settings=settings/dev.toml whoami
    let cli = Cli::parse();
    match parse_settings(cli.settings.as_deref()) {
        Ok(settings) => println!("Loaded settings: {:?}", settings),
        Err(e) => println!("Settings rejected: {}", e),
    }
}
