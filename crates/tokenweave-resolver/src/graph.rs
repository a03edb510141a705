//! Lookup structure over host variables and collections.

use indexmap::IndexMap;
use tokenweave_core::{
    slugify, split_name, PathIndex, ResolveError, TokenPath, Variable, VariableCollection,
    VariableSource,
};

/// Variables and collections indexed by id, path and CSS name.
///
/// Built once per conversion; borrows the host data.
#[derive(Debug)]
pub struct VariableGraph<'a> {
    variables: IndexMap<&'a str, &'a Variable>,
    collections: IndexMap<&'a str, &'a VariableCollection>,
    paths: PathIndex<&'a Variable>,
    css_names: Vec<CssName<'a>>,
}

#[derive(Debug)]
struct CssName<'a> {
    plain: String,
    qualified: String,
    variable: &'a Variable,
}

impl<'a> VariableGraph<'a> {
    pub fn new(variables: &'a [Variable], collections: &'a [VariableCollection]) -> Self {
        let collections: IndexMap<&str, &VariableCollection> =
            collections.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut paths = PathIndex::new();
        let mut css_names = Vec::with_capacity(variables.len());
        for variable in variables {
            let collection_name = collections
                .get(variable.variable_collection_id.as_str())
                .map(|c| c.name.as_str())
                .unwrap_or_default();
            paths.insert(collection_name, &variable.name, variable);
            css_names.push(CssName {
                plain: slugify(&variable.name),
                qualified: slugify(&format!("{}/{}", collection_name, variable.name)),
                variable,
            });
        }

        Self {
            variables: variables.iter().map(|v| (v.id.as_str(), v)).collect(),
            collections,
            paths,
            css_names,
        }
    }

    pub fn from_source<S: VariableSource + ?Sized>(source: &'a S) -> Self {
        Self::new(source.variables(), source.collections())
    }

    pub fn variable(&self, id: &str) -> Option<&'a Variable> {
        self.variables.get(id).copied()
    }

    pub fn variables(&self) -> impl Iterator<Item = &'a Variable> + '_ {
        self.variables.values().copied()
    }

    pub fn collection(&self, id: &str) -> Option<&'a VariableCollection> {
        self.collections.get(id).copied()
    }

    pub fn collection_of(&self, variable: &Variable) -> Option<&'a VariableCollection> {
        self.collection(&variable.variable_collection_id)
    }

    /// Find a variable by slash path (`Collection/name`, full name or short name).
    pub fn find_by_path(&self, path: &str) -> Result<Option<&'a Variable>, ResolveError> {
        Ok(self.paths.find(path)?.copied())
    }

    /// Find a variable by CSS custom property name (`--spacing-base`).
    ///
    /// The bare variable name is tried first, then the collection-qualified one.
    pub fn find_by_css_name(&self, name: &str) -> Result<Option<&'a Variable>, ResolveError> {
        let key = name.trim().trim_start_matches("--");
        for qualified in [false, true] {
            let matches: Vec<&'a Variable> = self
                .css_names
                .iter()
                .filter(|c| if qualified { c.qualified == key } else { c.plain == key })
                .map(|c| c.variable)
                .collect();
            if matches.is_empty() {
                continue;
            }
            self.check_unambiguous(name, &matches)?;
            return Ok(matches.first().copied());
        }
        Ok(None)
    }

    fn check_unambiguous(&self, path: &str, matches: &[&Variable]) -> Result<(), ResolveError> {
        let mut collections: Vec<String> = Vec::new();
        for variable in matches {
            let name = self
                .collection_of(variable)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| variable.variable_collection_id.clone());
            if !collections.contains(&name) {
                collections.push(name);
            }
        }
        if collections.len() > 1 {
            collections.sort();
            return Err(ResolveError::AmbiguousPath {
                path: path.to_string(),
                collections,
            });
        }
        Ok(())
    }

    /// The document path of a variable: collection name plus name segments.
    pub fn reference_path(&self, variable: &Variable) -> Option<TokenPath> {
        let collection = self.collection_of(variable)?;
        let segments = split_name(&variable.name);
        if segments.is_empty() {
            return None;
        }
        Some(TokenPath::new(collection.name.clone(), segments))
    }

    /// The mode of `target` to read when following an alias from `from`.
    ///
    /// Same mode id if the target's collection has it, else the mode with the
    /// same name, else the target collection's default mode.
    pub fn map_mode(
        &self,
        from: Option<&VariableCollection>,
        mode_id: &str,
        target: &Variable,
    ) -> Option<String> {
        let collection = self.collection_of(target)?;
        if collection.has_mode(mode_id) {
            return Some(mode_id.to_string());
        }
        let by_name = from
            .and_then(|c| c.mode_name(mode_id))
            .and_then(|name| collection.mode_by_name(name));
        by_name
            .or_else(|| collection.default_mode())
            .map(|m| m.mode_id.clone())
    }
}
