use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    Localizable, LocalizableString, LocalizableValue, LocalizationStatus, Resolve,
    identity_by_id, unresolved,
};
use crate::core::ResolutionPass;
use crate::error::ResolveError;

/// Pieces joined by an optional separator.
///
/// Pieces are joined in the order given. Bidirectional layout is left to the
/// presentation layer.
#[derive(Debug, Clone)]
pub enum LocalizableCompound {
    Constant(String),
    Pieces {
        pieces: Vec<LocalizableValue>,
        separator: Option<LocalizableString>,
    },
}

impl LocalizableCompound {
    pub fn new<I, V>(pieces: I, separator: Option<LocalizableString>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LocalizableValue>,
    {
        LocalizableCompound::Pieces {
            pieces: pieces.into_iter().map(Into::into).collect(),
            separator,
        }
    }

    pub fn constant(text: impl Into<String>) -> Self {
        LocalizableCompound::Constant(text.into())
    }

    fn join(pieces: &[LocalizableValue], separator: Option<&LocalizableString>) -> Result<String, ResolveError> {
        let separator = match separator {
            Some(separator) => separator.text()?,
            None => String::new(),
        };
        let texts = pieces
            .iter()
            .map(Localizable::text)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(texts.join(&separator))
    }
}

impl Localizable for LocalizableCompound {
    fn is_empty(&self) -> bool {
        match self {
            LocalizableCompound::Constant(s) => s.is_empty(),
            LocalizableCompound::Pieces { pieces, .. } => pieces.iter().all(Localizable::is_empty),
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableCompound::Constant(_) => LocalizationStatus::Localized,
            LocalizableCompound::Pieces { pieces, separator } => LocalizationStatus::all(
                pieces
                    .iter()
                    .map(Localizable::localization_status)
                    .chain(separator.iter().map(Localizable::localization_status)),
            ),
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableCompound::Constant(s) => format!("compound={s}"),
            LocalizableCompound::Pieces { pieces, separator } => {
                let ids: Vec<String> = pieces.iter().map(Localizable::id).collect();
                let separator = separator.as_ref().map(Localizable::id).unwrap_or_default();
                format!("compound:[{}]:{separator}", ids.join(","))
            }
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        match self {
            LocalizableCompound::Constant(s) => Ok(s.clone()),
            LocalizableCompound::Pieces { pieces, separator } => {
                if self.localization_status() == LocalizationStatus::Pending {
                    return Err(ResolveError::Unbound { id: self.id() });
                }
                Self::join(pieces, separator.as_ref())
            }
        }
    }
}

impl Resolve for LocalizableCompound {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let LocalizableCompound::Pieces { pieces, separator } = self else {
            return Ok(self.clone());
        };

        let pieces = pieces
            .iter()
            .map(|piece| piece.resolve(pass))
            .collect::<Result<Vec<_>, _>>()?;
        let separator = separator
            .as_ref()
            .map(|separator| separator.resolve(pass))
            .transpose()?;
        Self::join(&pieces, separator.as_ref()).map(LocalizableCompound::Constant)
    }
}

identity_by_id!(LocalizableCompound);

impl Serialize for LocalizableCompound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text() {
            Ok(text) => serializer.serialize_str(&text),
            Err(_) => Err(unresolved(&self.id())),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizableCompound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LocalizableCompound::Constant)
    }
}
