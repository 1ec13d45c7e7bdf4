use super::*;

fn parse(args: &[&str]) -> Command {
    Command::try_parse_from(std::iter::once("fnchat").chain(args.iter().copied()))
        .expect("parse args")
}

#[test]
fn test_initial_route() {
    assert_eq!(parse(&[]).initial_route().unwrap(), Route::Home);
    assert_eq!(
        parse(&["--route", "/settings"]).initial_route().unwrap(),
        Route::Settings
    );
    assert_eq!(
        parse(&["--route", "/settings", "--conversation", "abc"])
            .initial_route()
            .unwrap(),
        Route::Chat("abc".to_string())
    );
    assert!(parse(&["--route", "/nowhere"]).initial_route().is_err());
    assert!(parse(&["--conversation", "a/b"]).initial_route().is_err());
}

#[test]
fn test_get_config_from_file() {
    let cmd = parse(&["-c", "testdata/config.toml"]);
    let config = cmd.get_config().expect("load config");
    assert_eq!(config.api.base_url, "https://chat.example.com/api");

    let cmd = parse(&["-c", "testdata/missing.toml"]);
    assert!(cmd.get_config().is_err());
}

#[test]
fn test_flags() {
    assert_eq!(parse(&["-v"]).version(), true);
    assert_eq!(parse(&[]).version(), false);
    assert!(parse(&[]).credentials().unwrap().is_none());
}
