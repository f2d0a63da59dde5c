use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("wincap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List onscreen windows and capture one as an image")
        .long_about(
            "wincap enumerates the top-level windows of the current desktop session and \
             captures a single window by title substring or id. Captures are written as PNG \
             or JPEG, or printed as base64.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list").about("List all top-level windows").arg(
                Arg::new("json")
                    .long("json")
                    .help("Output in JSON format")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("capture")
                .about("Capture one window")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .short('t')
                        .help("Capture the first window whose title contains this text (case-insensitive)"),
                )
                .arg(
                    Arg::new("id")
                        .long("id")
                        .help("Capture the window with this id (see 'wincap list')")
                        .value_parser(clap::value_parser!(u64)),
                )
                .group(
                    ArgGroup::new("target")
                        .args(["title", "id"])
                        .required(true),
                )
                .arg(
                    Arg::new("crop-title")
                        .long("crop-title")
                        .help("Exclude the title bar from the capture")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Save to file path (default: configured directory, else base64 to stdout)"),
                )
                .arg(
                    Arg::new("base64")
                        .long("base64")
                        .help("Print the encoded image as base64 even if an output directory is configured")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (default: from config, else png)")
                        .value_parser(["png", "jpg", "jpeg"]),
                )
                .arg(
                    Arg::new("quality")
                        .long("quality")
                        .help("JPEG quality 1-100 (default: from config, else 90)")
                        .value_parser(clap::value_parser!(u8).range(1..=100)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "wincap");
    }

    #[test]
    fn test_cli_list() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wincap", "list"]);
        assert!(matches.is_ok());
    }

    #[test]
    fn test_cli_list_json() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wincap", "list", "--json"])
            .unwrap();
        let list_matches = matches.subcommand_matches("list").unwrap();
        assert!(list_matches.get_flag("json"));
    }

    #[test]
    fn test_cli_capture_by_title() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wincap", "capture", "--title", "Terminal", "--crop-title"])
            .unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(
            capture_matches.get_one::<String>("title").unwrap(),
            "Terminal"
        );
        assert!(capture_matches.get_flag("crop-title"));
    }

    #[test]
    fn test_cli_capture_by_id() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wincap", "capture", "--id", "4242", "-o", "/tmp/w.png"])
            .unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(*capture_matches.get_one::<u64>("id").unwrap(), 4242);
        assert_eq!(
            capture_matches.get_one::<String>("output").unwrap(),
            "/tmp/w.png"
        );
    }

    #[test]
    fn test_cli_capture_requires_target() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["wincap", "capture"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_capture_title_conflicts_with_id() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["wincap", "capture", "--title", "a", "--id", "1"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_capture_rejects_unknown_format() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["wincap", "capture", "-t", "a", "--format", "gif"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_capture_quality_range() {
        let app = build_cli();
        assert!(
            build_cli()
                .try_get_matches_from(vec!["wincap", "capture", "-t", "a", "--quality", "0"])
                .is_err()
        );
        let matches = app
            .try_get_matches_from(vec!["wincap", "capture", "-t", "a", "--quality", "75"])
            .unwrap();
        let capture_matches = matches.subcommand_matches("capture").unwrap();
        assert_eq!(*capture_matches.get_one::<u8>("quality").unwrap(), 75);
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["wincap", "list", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
