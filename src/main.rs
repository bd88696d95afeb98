// SPDX-License-Identifier: MPL-2.0
use panolens::app::{self, paths, Flags};

const HELP: &str = "\
panolens - 360° panorama viewer

USAGE:
  panolens [OPTIONS]

OPTIONS:
  --lang <LOCALE>       UI language (e.g. en-US, ja)
  --catalog <SOURCE>    Catalog directory or http(s) base URL
  --compact             Force the compact layout
  --config-dir <DIR>    Directory holding settings.toml
  --data-dir <DIR>      Directory holding the default catalog
  -h, --help            Print this help
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        catalog: args.opt_value_from_str("--catalog")?,
        compact: args.contains("--compact"),
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring unexpected arguments: {:?}", rest);
    }
    Ok(flags)
}

fn main() -> iced::Result {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print!("{}", HELP);
        return Ok(());
    }

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, HELP);
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}
