use super::*;
use crate::{Location, Span};

#[test]
fn key_like_tokens() {
    assert_eq!(Token::Key("a").into_key(), Ok(Cow::Borrowed("a")));
    assert!(matches!(Token::Key("a").into_key(), Ok(Cow::Borrowed("a"))));
    assert_eq!(Token::String(Cow::Borrowed("a b")).into_key(), Ok("a b".into()));
    assert!(matches!(
        Token::String(Cow::Owned("x".into())).into_key(),
        Ok(Cow::Owned(s)) if s == "x"
    ));
    assert_eq!(Token::Integer(1).into_key(), Err(Token::Integer(1)));
    assert_eq!(Token::Boolean(true).into_key(), Err(Token::Boolean(true)));
    assert_eq!(Token::LeftBracket.into_key(), Err(Token::LeftBracket));
}

#[test]
fn token_list_yields_in_order_then_none() {
    let mut list = TokenList::from(vec![
        Spanned::with_location(Token::Key("a"), Span::new(0, 1), Location::new(1, 1)),
        Spanned::with_location(Token::Equals, Span::new(2, 3), Location::new(1, 3)),
    ]);

    let first = list.next_token().unwrap().unwrap();
    assert_eq!(first, Token::Key("a"));
    assert_eq!(first.span, Span::new(0, 1));

    let second = list.next_token().unwrap().unwrap();
    assert_eq!(second, Token::Equals);
    assert_eq!(second.location, Location::new(1, 3));

    assert!(list.next_token().unwrap().is_none());
    assert!(list.next_token().unwrap().is_none());
}

#[test]
fn descriptions() {
    assert_eq!(Token::Equals.describe(), "an equals");
    assert_eq!(Token::Newline.describe(), "a newline");
    assert_eq!(Token::Key("k").describe(), "an identifier");
    assert_eq!(Token::Integer(3).describe(), "an integer");
}
