use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::module::{Declaration, PageModule};

/// The three page templates elm-spa generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageShape {
    /// View-only page, no state.
    Static,
    /// Stateful page whose init/update return `( Model, Cmd Msg )`.
    Element,
    /// Stateful page whose init/update return `( Model, Effect Msg )`.
    Advanced,
}

impl PageShape {
    /// Whether the shape carries Model/Msg declarations and a full
    /// init/update/subscriptions set.
    pub fn has_state(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Exposed identifiers for the module header.
    pub fn exposing(self) -> &'static str {
        match self {
            Self::Static => "page",
            Self::Element | Self::Advanced => "page, Model, Msg",
        }
    }
}

impl fmt::Display for PageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Static => "static",
            Self::Element => "element",
            Self::Advanced => "advanced",
        };
        write!(f, "{token}")
    }
}

impl FromStr for PageShape {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "static" => Ok(Self::Static),
            "element" => Ok(Self::Element),
            "advanced" => Ok(Self::Advanced),
            "sandbox" => Err(CoreError::Parse(
                "sandbox pages are not supported; use `element` instead".into(),
            )),
            other => Err(CoreError::Parse(format!(
                "unknown page template `{other}` (expected static, element, or advanced)"
            ))),
        }
    }
}

/// Classify the current file from its entry point and signatures alone, so
/// the result survives manual edits and elm-format runs. Tie-break order:
/// effect-typed init/update wins, then the entry point's constructor.
pub fn detect(module: &PageModule) -> Result<PageShape, CoreError> {
    let Some(page) = module.function("page") else {
        return Err(CoreError::UnrecognizedShape(
            "module has no `page` entry point".into(),
        ));
    };
    let body = page.lines.join(" ");

    let effect_results = ["init", "update"].iter().any(|name| {
        module
            .function(name)
            .and_then(Declaration::annotation)
            .is_some_and(|a| a.contains("Effect "))
    });
    if effect_results || body.contains("Page.advanced") {
        return Ok(PageShape::Advanced);
    }
    if body.contains("Page.element") {
        return Ok(PageShape::Element);
    }
    if body.contains("Page.static") {
        return Ok(PageShape::Static);
    }
    if body.contains("Page.sandbox") {
        return Err(CoreError::UnrecognizedShape(
            "Page.sandbox entry points are not supported".into(),
        ));
    }
    Err(CoreError::UnrecognizedShape(
        "entry point calls none of Page.static, Page.element, Page.advanced".into(),
    ))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn parse(text: &str) -> PageModule {
        PageModule::parse(text).unwrap()
    }

    #[test]
    fn test_detect_static() {
        let module = parse(indoc! {r#"
            module Pages.Home_ exposing (page)

            page : Shared.Model -> Request.With Params -> Page
            page shared req =
                Page.static
                    { view = view
                    }
        "#});
        assert_eq!(detect(&module).unwrap(), PageShape::Static);
    }

    #[test]
    fn test_detect_element() {
        let module = parse(indoc! {r#"
            module Pages.Home_ exposing (Model, Msg, page)

            page : Shared.Model -> Request.With Params -> Page.With Model Msg
            page shared req =
                Page.element
                    { init = init
                    , update = update
                    , view = view
                    , subscriptions = subscriptions
                    }
        "#});
        assert_eq!(detect(&module).unwrap(), PageShape::Element);
    }

    #[test]
    fn test_detect_advanced_by_constructor() {
        let module = parse(indoc! {r#"
            module Pages.Home_ exposing (Model, Msg, page)

            page : Shared.Model -> Request.With Params -> Page.With Model Msg
            page shared req =
                Page.advanced
                    { init = init
                    , update = update
                    , view = view
                    , subscriptions = subscriptions
                    }
        "#});
        assert_eq!(detect(&module).unwrap(), PageShape::Advanced);
    }

    #[test]
    fn test_effect_signature_wins_over_constructor() {
        // A half-edited page: entry point still says element, but init
        // already returns an Effect pair.
        let module = parse(indoc! {r#"
            module Pages.Home_ exposing (Model, Msg, page)

            page : Shared.Model -> Request.With Params -> Page.With Model Msg
            page shared req =
                Page.element
                    { init = init
                    , update = update
                    , view = view
                    , subscriptions = subscriptions
                    }

            init : ( Model, Effect Msg )
            init =
                ( {}, Effect.none )
        "#});
        assert_eq!(detect(&module).unwrap(), PageShape::Advanced);
    }

    #[test]
    fn test_sandbox_is_unrecognized() {
        let module = parse(indoc! {r#"
            module Pages.Home_ exposing (Model, Msg, page)

            page : Shared.Model -> Request.With Params -> Page.With Model Msg
            page shared req =
                Page.sandbox
                    { init = init
                    , update = update
                    , view = view
                    }
        "#});
        let err = detect(&module).unwrap_err();
        assert!(matches!(err, CoreError::UnrecognizedShape(_)));
    }

    #[test]
    fn test_missing_entry_point_is_unrecognized() {
        let module = parse("module Pages.Home_ exposing (page)\n\nview : View msg\nview =\n    View.placeholder \"x\"\n");
        let err = detect(&module).unwrap_err();
        assert!(err.to_string().contains("no `page` entry point"));
    }

    #[test]
    fn test_shape_tokens_round_trip() {
        for (token, shape) in [
            ("static", PageShape::Static),
            ("element", PageShape::Element),
            ("advanced", PageShape::Advanced),
        ] {
            assert_eq!(token.parse::<PageShape>().unwrap(), shape);
            assert_eq!(shape.to_string(), token);
        }
        assert!("sandbox".parse::<PageShape>().is_err());
        assert!("elm".parse::<PageShape>().is_err());
    }
}
