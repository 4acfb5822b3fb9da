use http::Method;

/// A template that can not be turned into a pattern.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("placeholder name can not be empty")]
    EmptyName,

    #[error("invalid placeholder name: {0:?}")]
    InvalidName(String),

    #[error("unclosed '{{' in placeholder")]
    UnclosedBrace,

    #[error("duplicate placeholder: {0:?}")]
    DuplicatePlaceholder(String),

    #[error("wildcard placeholder {0:?} can only appear at end")]
    WildcardNotLast(String),

    #[error("placeholder {0:?} follows another placeholder without a separator")]
    AmbiguousBoundary(String),

    #[error("required placeholder {0:?} follows an optional one")]
    RequiredAfterOptional(String),

    #[error("unknown placeholder type: {0:?}")]
    UnknownType(String),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("{source}: pattern = {pattern:?}")]
    Compile {
        pattern: String,
        #[source]
        source: CompileError,
    },

    #[error("route name {0:?} is already taken")]
    DuplicateRouteName(String),

    #[error("unknown route: {0:?}")]
    UnknownRoute(String),

    #[error("missing value for placeholder {0:?}")]
    MissingPlaceholder(String),

    #[error("value {value:?} does not satisfy placeholder {name:?}")]
    InvalidPlaceholder { name: String, value: String },

    #[error("unknown condition: {0:?}")]
    UnknownCondition(String),

    #[error("unknown shortcut: {0:?}")]
    UnknownShortcut(String),
}

/// Why a request did not resolve to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("no route found")]
    NoMatch,

    /// The path matched at least one endpoint, but none accepts the method.
    #[error("method not allowed, allowed: {allowed:?}")]
    MethodNotAllowed { allowed: Vec<Method> },
}
