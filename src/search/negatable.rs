/// Wrapper around a type to indicate that it can be negated. The main user is
/// [`crate::search::cnf::Literal`], a negatable proposition. Positive values order
/// before negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Negatable<T> {
    Positive(T),
    Negative(T),
}

impl<T> Negatable<T> {
    pub fn new(negated: bool, value: T) -> Self {
        if negated {
            Self::Negative(value)
        } else {
            Self::Positive(value)
        }
    }

    #[inline(always)]
    pub fn is_negated(&self) -> bool {
        match self {
            Self::Positive(_) => false,
            Self::Negative(_) => true,
        }
    }

    #[inline(always)]
    pub fn underlying(&self) -> &T {
        match self {
            Self::Positive(value) => value,
            Self::Negative(value) => value,
        }
    }

    pub fn into_underlying(self) -> T {
        match self {
            Self::Positive(value) => value,
            Self::Negative(value) => value,
        }
    }

    /// The complement of this value.
    pub fn negated(self) -> Self {
        match self {
            Self::Positive(value) => Self::Negative(value),
            Self::Negative(value) => Self::Positive(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Negatable<U> {
        match self {
            Self::Positive(value) => Negatable::Positive(f(value)),
            Self::Negative(value) => Negatable::Negative(f(value)),
        }
    }
}

impl<T> From<T> for Negatable<T> {
    fn from(value: T) -> Self {
        Self::Positive(value)
    }
}
