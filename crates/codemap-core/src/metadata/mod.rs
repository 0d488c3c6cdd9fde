//! Assembly metadata snapshots, the input side of the generator
//!
//! A snapshot describes one assembly the way a reflector saw it: identity,
//! attributes, dependencies, and a flat, declaration-ordered table of types
//! and their members addressed by metadata tokens. Snapshots are plain serde
//! data; building the declaration tree from one never mutates it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod types;

pub use types::{
    AccessorMetadata, AssemblyMetadata, AttributeArgumentMetadata, AttributeMetadata,
    ConstantValue, GenericParameterMetadata, GenericVariance, MemberKind, MemberMetadata,
    NamedArgumentMetadata, ParameterMetadata, ParameterPassing, TypeIndex, TypeKind, TypeMetadata,
    TypeRef,
};

/// Opaque identifier of a type or member row within one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataToken(pub u32);

impl fmt::Display for MetadataToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// A four-part assembly version (`major.minor.build.revision`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    /// Major version component
    pub major: u16,
    /// Minor version component
    pub minor: u16,
    /// Build number
    pub build: u16,
    /// Revision number
    pub revision: u16,
}

impl Version {
    /// Create a new version from its four components
    #[must_use]
    pub fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(VersionError::ComponentCount(parts.len()));
        }
        let mut components = [0u16; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionError::InvalidComponent((*part).to_string()))?;
        }
        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

// Versions travel as dotted text in snapshots, not as four separate fields.
impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Error raised when parsing a dotted version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("expected four dot-separated version components, found {0}")]
    ComponentCount(usize),

    #[error("invalid version component {0:?}")]
    InvalidComponent(String),
}

/// Full identity of an assembly: name, version, culture, public-key token
///
/// An empty culture is the neutral culture. The public-key token, when
/// present, is lowercase hex text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyName {
    /// Simple assembly name
    pub name: String,
    /// Assembly version
    pub version: Version,
    /// Culture name, empty for the neutral culture
    #[serde(default)]
    pub culture: String,
    /// Public-key token as lowercase hex, if the assembly is signed
    #[serde(default)]
    pub public_key_token: Option<String>,
}

impl AssemblyName {
    /// Create an assembly name with the neutral culture and no key token
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            culture: String::new(),
            public_key_token: None,
        }
    }

    /// Set the public-key token
    #[must_use]
    pub fn with_public_key_token(mut self, token: impl Into<String>) -> Self {
        self.public_key_token = Some(token.into());
        self
    }

    /// Set the culture
    #[must_use]
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = culture.into();
        self
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let culture = if self.culture.is_empty() {
            "neutral"
        } else {
            &self.culture
        };
        let token = self.public_key_token.as_deref().unwrap_or("null");
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name, self.version, culture, token
        )
    }
}

/// Accessibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessModifier {
    /// Visible to everyone
    Public,
    /// Visible to derived types (`protected`)
    Family,
    /// Visible to derived types and the declaring assembly (`protected internal`)
    FamilyOrAssembly,
    /// Visible to derived types within the declaring assembly (`private protected`)
    FamilyAndAssembly,
    /// Visible within the declaring assembly (`internal`)
    Assembly,
    /// Visible within the declaring type
    Private,
}

impl AccessModifier {
    /// Whether the declaration is visible outside its assembly to any consumer
    #[must_use]
    pub fn is_exposed(self) -> bool {
        matches!(
            self,
            AccessModifier::Public | AccessModifier::Family | AccessModifier::FamilyOrAssembly
        )
    }

    /// Stable lowercase name used in generated output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccessModifier::Public => "public",
            AccessModifier::Family => "family",
            AccessModifier::FamilyOrAssembly => "familyOrAssembly",
            AccessModifier::FamilyAndAssembly => "familyAndAssembly",
            AccessModifier::Assembly => "assembly",
            AccessModifier::Private => "private",
        }
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which declarations the tree builder admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFilter {
    /// Only declarations visible outside the assembly (public, family,
    /// family-or-assembly)
    #[default]
    Public,
    /// Every declaration regardless of accessibility
    All,
}

impl AccessFilter {
    /// Whether a declaration with the given accessibility passes the filter
    #[must_use]
    pub fn admits(self, access: AccessModifier) -> bool {
        match self {
            AccessFilter::Public => access.is_exposed(),
            AccessFilter::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_and_display() {
        let version: Version = "1.2.3.4".parse().unwrap();
        assert_eq!(version, Version::new(1, 2, 3, 4));
        assert_eq!(version.to_string(), "1.2.3.4");
    }

    #[test]
    fn test_version_parse_rejects_wrong_arity() {
        let err = "1.2.3".parse::<Version>().unwrap_err();
        assert_eq!(err, VersionError::ComponentCount(3));
        let err = "1.2.3.4.5".parse::<Version>().unwrap_err();
        assert_eq!(err, VersionError::ComponentCount(5));
    }

    #[test]
    fn test_version_parse_rejects_bad_component() {
        let err = "1.2.x.4".parse::<Version>().unwrap_err();
        assert_eq!(err, VersionError::InvalidComponent("x".to_string()));
    }

    #[test]
    fn test_version_ordering() {
        let old: Version = "1.2.3.4".parse().unwrap();
        let new: Version = "1.10.0.0".parse().unwrap();
        assert!(old < new);
    }

    #[test]
    fn test_version_serde_as_string() {
        let json = serde_json::to_string(&Version::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "\"1.2.3.4\"");
        let version: Version = serde_json::from_str("\"4.3.2.1\"").unwrap();
        assert_eq!(version, Version::new(4, 3, 2, 1));
    }

    #[test]
    fn test_assembly_name_display() {
        let name = AssemblyName::new("CodeMap.Tests.Data", Version::new(1, 2, 3, 4));
        assert_eq!(
            name.to_string(),
            "CodeMap.Tests.Data, Version=1.2.3.4, Culture=neutral, PublicKeyToken=null"
        );

        let signed = name.with_public_key_token("b03f5f7f11d50a3a");
        assert!(signed.to_string().ends_with("PublicKeyToken=b03f5f7f11d50a3a"));
    }

    #[test]
    fn test_access_filter_public_admits_exposed_only() {
        let filter = AccessFilter::Public;
        assert!(filter.admits(AccessModifier::Public));
        assert!(filter.admits(AccessModifier::Family));
        assert!(filter.admits(AccessModifier::FamilyOrAssembly));
        assert!(!filter.admits(AccessModifier::FamilyAndAssembly));
        assert!(!filter.admits(AccessModifier::Assembly));
        assert!(!filter.admits(AccessModifier::Private));
    }

    #[test]
    fn test_access_filter_all_admits_everything() {
        let filter = AccessFilter::All;
        assert!(filter.admits(AccessModifier::Private));
        assert!(filter.admits(AccessModifier::Assembly));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(MetadataToken(0x0200_0001).to_string(), "0x02000001");
    }
}
