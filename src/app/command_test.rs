use super::*;

#[test]
fn test_parse_messages() {
    assert_eq!(Command::parse("").unwrap(), None);
    assert_eq!(Command::parse("   ").unwrap(), None);
    assert_eq!(
        Command::parse("  hello there ").unwrap(),
        Some(Command::Say("hello there".to_string()))
    );
}

#[test]
fn test_parse_commands() {
    assert_eq!(Command::parse("/models").unwrap(), Some(Command::Models));
    assert_eq!(
        Command::parse("/model 3").unwrap(),
        Some(Command::Model(Some(3)))
    );
    assert_eq!(
        Command::parse("/model none").unwrap(),
        Some(Command::Model(None))
    );
    assert_eq!(Command::parse("/locale").unwrap(), Some(Command::Locale(None)));
    assert_eq!(
        Command::parse("/locale zh").unwrap(),
        Some(Command::Locale(Some("zh".to_string())))
    );
    assert_eq!(
        Command::parse("/go /chat/abc").unwrap(),
        Some(Command::Go(Route::Chat("abc".to_string())))
    );
    assert_eq!(
        Command::parse("/providers").unwrap(),
        Some(Command::Providers(None))
    );
    assert_eq!(
        Command::parse("/providers ollama").unwrap(),
        Some(Command::Providers(Some("ollama".to_string())))
    );
    assert_eq!(Command::parse("/exit").unwrap(), Some(Command::Quit));
    assert_eq!(Command::parse("/quit").unwrap(), Some(Command::Quit));
}

#[test]
fn test_parse_errors() {
    assert!(Command::parse("/model").is_err());
    assert!(Command::parse("/model gpt").is_err());
    assert!(Command::parse("/models extra").is_err());
    assert!(Command::parse("/go /nowhere").is_err());
    assert!(Command::parse("/dance").is_err());
    assert!(Command::parse("/locale en fr").is_err());
}
