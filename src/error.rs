use std::fmt;

/// Boxed cause carried by an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Classifies where a failure came from and how callers should treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote is missing configuration required to fetch.
    Configuration,
    /// A reference does not exist. Recoverable: means "no local copy".
    NotFound,
    /// A refspec does not apply to a name. Recoverable: means "skip".
    NoMatch,
    /// Any other failure reported by a transport, store, matcher or walker.
    Collaborator,
    /// The revision walk has no more commits. Not a failure.
    TraversalExhausted,
}

/// An error with a structured kind and the trail of operations it passed through.
///
/// Context is stored innermost first and rendered outermost first, e.g.
/// `failed to filter the reference list for wants: error looking up local ref: disk on fire`.
#[derive(Debug, thiserror::Error)]
#[error("{}", render(.message, .context))]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<String>,
    #[source]
    source: Option<BoxError>,
}

fn render(message: &str, context: &[String]) -> String {
    let mut out = String::new();
    for annotation in context.iter().rev() {
        out.push_str(annotation);
        out.push_str(": ");
    }
    out.push_str(message);
    out
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            context: Vec::new(),
            source: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn not_found(name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("reference '{}' not found", name))
    }

    pub fn no_match(name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NoMatch, format!("'{}' does not match the refspec", name))
    }

    pub fn exhausted() -> Self {
        Self::new(ErrorKind::TraversalExhausted, "revision walk is over")
    }

    /// A collaborator failure caused by `source`.
    pub fn collaborator<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error {
            kind: ErrorKind::Collaborator,
            message: message.into(),
            context: Vec::new(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Context annotations, innermost first.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_no_match(&self) -> bool {
        self.kind == ErrorKind::NoMatch
    }

    pub fn is_exhausted(&self) -> bool {
        self.kind == ErrorKind::TraversalExhausted
    }

    /// Turn `NotFound` and `NoMatch` into `Collaborator`.
    ///
    /// Those kinds are control flow inside the want filter only; anywhere else
    /// they are plain failures of the collaborator that produced them.
    pub fn into_collaborator(mut self) -> Self {
        if matches!(self.kind, ErrorKind::NotFound | ErrorKind::NoMatch) {
            self.kind = ErrorKind::Collaborator;
        }
        self
    }

    /// Append an annotation describing the operation that failed.
    pub fn wrap(mut self, annotation: impl Into<String>) -> Self {
        self.context.push(annotation.into());
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::collaborator(e.to_string(), e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::collaborator(format!("YAML error: {}", e), e)
    }
}

/// Adds context annotations to a [`Result`] as it propagates outward.
pub trait ErrorContext<T> {
    fn context(self, annotation: impl Into<String>) -> Result<T>;

    fn with_context<S, F>(self, f: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, annotation: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().wrap(annotation))
    }

    fn with_context<S, F>(self, f: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        self.map_err(|e| e.into().wrap(f()))
    }
}
