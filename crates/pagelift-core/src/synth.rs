use indoc::indoc;

use crate::module::Declaration;
use crate::policy::ParameterPolicy;
use crate::shape::PageShape;

/// The freshly generated declaration set for a target shape. Model and Msg
/// are kept separate because they are only emitted when the file does not
/// already declare them.
#[derive(Debug)]
pub struct Synthesized {
    /// Managed functions in emit order, entry point first.
    pub functions: Vec<Declaration>,
    pub model: Option<Declaration>,
    pub msg: Option<Declaration>,
}

pub fn synthesize(target: PageShape, policy: &ParameterPolicy) -> Synthesized {
    let functions = match target {
        PageShape::Static => vec![page(target, policy), view(target, policy)],
        PageShape::Element | PageShape::Advanced => vec![
            page(target, policy),
            init(target, policy),
            update(target, policy),
            subscriptions(policy),
            view(target, policy),
        ],
    };
    Synthesized {
        functions,
        model: target.has_state().then(model_decl),
        msg: target.has_state().then(msg_decl),
    }
}

/// `( "Cmd", "Cmd.none" )` or `( "Effect", "Effect.none" )`.
fn effect_pair(target: PageShape) -> (&'static str, &'static str) {
    match target {
        PageShape::Advanced => ("Effect", "Effect.none"),
        PageShape::Static | PageShape::Element => ("Cmd", "Cmd.none"),
    }
}

fn page(target: PageShape, policy: &ParameterPolicy) -> Declaration {
    let fwd = policy.forward_suffix();
    let text = match target {
        PageShape::Static => format!(
            indoc! {r#"
                page : Shared.Model -> Request.With Params -> Page
                page shared req =
                    Page.static
                        {{ view = view{fwd}
                        }}"#},
            fwd = fwd,
        ),
        PageShape::Element => format!(
            indoc! {r#"
                page : Shared.Model -> Request.With Params -> Page.With Model Msg
                page shared req =
                    Page.element
                        {{ init = init{fwd}
                        , update = update{fwd}
                        , view = view{fwd}
                        , subscriptions = subscriptions{fwd}
                        }}"#},
            fwd = fwd,
        ),
        PageShape::Advanced => format!(
            indoc! {r#"
                page : Shared.Model -> Request.With Params -> Page.With Model Msg
                page shared req =
                    Page.advanced
                        {{ init = init{fwd}
                        , update = update{fwd}
                        , view = view{fwd}
                        , subscriptions = subscriptions{fwd}
                        }}"#},
            fwd = fwd,
        ),
    };
    Declaration::from_text("page", &text)
}

fn init(target: PageShape, policy: &ParameterPolicy) -> Declaration {
    let (wrap, none) = effect_pair(target);
    let text = format!(
        indoc! {r#"
            init : {sig}( Model, {wrap} Msg )
            init {args}=
                ( {{}}, {none} )"#},
        sig = policy.annotation_prefix(),
        args = policy.binding_prefix(),
        wrap = wrap,
        none = none,
    );
    Declaration::from_text("init", &text)
}

fn update(target: PageShape, policy: &ParameterPolicy) -> Declaration {
    let (wrap, none) = effect_pair(target);
    let text = format!(
        indoc! {r#"
            update : {sig}Msg -> Model -> ( Model, {wrap} Msg )
            update {args}msg model =
                case msg of
                    _ ->
                        ( model, {none} )"#},
        sig = policy.annotation_prefix(),
        args = policy.binding_prefix(),
        wrap = wrap,
        none = none,
    );
    Declaration::from_text("update", &text)
}

fn subscriptions(policy: &ParameterPolicy) -> Declaration {
    let text = format!(
        indoc! {r#"
            subscriptions : {sig}Model -> Sub Msg
            subscriptions {args}model =
                Sub.none"#},
        sig = policy.annotation_prefix(),
        args = policy.binding_prefix(),
    );
    Declaration::from_text("subscriptions", &text)
}

fn view(target: PageShape, policy: &ParameterPolicy) -> Declaration {
    let text = if target.has_state() {
        format!(
            indoc! {r#"
                view : {sig}Model -> View Msg
                view {args}model =
                    View.placeholder "Hello World""#},
            sig = policy.annotation_prefix(),
            args = policy.binding_prefix(),
        )
    } else {
        indoc! {r#"
            view : View msg
            view =
                View.placeholder "Hello World""#}
        .to_string()
    };
    Declaration::from_text("view", &text)
}

fn model_decl() -> Declaration {
    Declaration::from_text(
        "Model",
        indoc! {r#"
            type alias Model =
                {}"#},
    )
}

fn msg_decl() -> Declaration {
    Declaration::from_text(
        "Msg",
        indoc! {r#"
            type Msg
                = ReplaceMe"#},
    )
}
