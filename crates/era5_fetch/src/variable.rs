//! The variables to download, each with the short code used in its file names.

use std::collections::HashSet;

use serde::Deserialize;

/// Abbreviated variable identifier used in output file names, e.g. `t2m`.
#[derive(Hash, Eq, PartialEq, Clone, Debug, derive_more::Display, Deserialize)]
#[serde(try_from = "String")]
pub struct ShortCode(String);

impl ShortCode {
    pub fn new(code: &str) -> Result<Self, CatalogError> {
        if code.is_empty()
            || !code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(CatalogError::InvalidShortCode(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CatalogError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(&code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, derive_more::Display)]
#[display("{name} ({short_code})")]
pub struct Variable {
    /// The variable's name in the CDS catalogue, e.g. `2m_temperature`.
    pub name: String,
    pub short_code: ShortCode,
}

impl Variable {
    pub fn new(name: &str, short_code: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            name: name.to_string(),
            short_code: ShortCode::new(short_code)?,
        })
    }
}

/// An ordered list of variables. Names and short codes are each unique.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Variable>")]
pub struct VariableCatalog(Vec<Variable>);

impl VariableCatalog {
    pub fn new(variables: Vec<Variable>) -> Result<Self, CatalogError> {
        if variables.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut names = HashSet::new();
        let mut codes = HashSet::new();
        for v in variables.iter() {
            if v.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !names.insert(v.name.as_str()) {
                return Err(CatalogError::DuplicateName(v.name.clone()));
            }
            if !codes.insert(&v.short_code) {
                return Err(CatalogError::DuplicateShortCode(v.short_code.clone()));
            }
        }
        Ok(Self(variables))
    }

    /// The eight ERA5 single-level variables of the Horn of Africa run.
    pub fn era5_single_levels() -> Self {
        let variables = [
            ("surface_net_solar_radiation", "ssr"),
            ("2m_temperature", "t2m"),
            ("total_precipitation", "tp"),
            ("10m_v_component_of_wind", "v10"),
            ("10m_u_component_of_wind", "u10"),
            ("mean_sea_level_pressure", "msl"),
            ("2m_dewpoint_temperature", "2d"),
            ("surface_net_thermal_radiation", "str"),
        ]
        .into_iter()
        .map(|(name, code)| Variable {
            name: name.to_string(),
            short_code: ShortCode(code.to_string()),
        })
        .collect();
        Self(variables)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.0.iter().find(|v| v.name == name)
    }
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::era5_single_levels()
    }
}

impl TryFrom<Vec<Variable>> for VariableCatalog {
    type Error = CatalogError;

    fn try_from(variables: Vec<Variable>) -> Result<Self, Self::Error> {
        Self::new(variables)
    }
}

impl<'a> IntoIterator for &'a VariableCatalog {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, derive_more::Display)]
pub enum CatalogError {
    #[display("The variable list is empty")]
    Empty,
    #[display("A variable has an empty name")]
    EmptyName,
    #[display("Variable '{_0}' is listed more than once")]
    DuplicateName(String),
    #[display("Short code '{_0}' is used by more than one variable")]
    DuplicateShortCode(ShortCode),
    #[display("Invalid short code '{_0}': use only ASCII letters, digits and '-'")]
    InvalidShortCode(String),
}
