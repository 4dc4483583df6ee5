//! Function repository
//!
//! Maps function names to implementations and implementation types to custom
//! compilers. A repository is built during setup and then shared read-only;
//! loading modules needs `&mut self`, so any post-setup load must be
//! serialized against lookups by the caller.

use std::any::TypeId;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace};
use once_cell::sync::Lazy;

use super::{date, info, logical, lookup, math, statistical, text, workday};
use super::{Function, FunctionModule};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::FunctionCompiler;

/// Global repository with every built-in module (lazily initialized)
static GLOBAL_REPOSITORY: Lazy<Repository> = Lazy::new(Repository::create);

/// Prefixes written in front of newer function names in saved workbooks
const FUTURE_FUNCTION_PREFIXES: [&str; 2] = ["_xlfn.", "_xlws."];

/// Function name and compiler registry
#[derive(Default, Clone)]
pub struct Repository {
    functions: AHashMap<String, Arc<dyn Function>>,
    compilers: AHashMap<TypeId, Arc<dyn FunctionCompiler>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with all built-in functions
    pub fn create() -> Self {
        let mut repository = Self::new();

        repository.load_module(&math::module());
        repository.load_module(&statistical::module());
        repository.load_module(&logical::module());
        repository.load_module(&lookup::module());
        repository.load_module(&info::module());
        repository.load_module(&text::module());
        repository.load_module(&date::module());
        repository.load_module(&workday::module());

        repository
    }

    /// Shared repository with all built-in functions
    pub fn global() -> &'static Repository {
        &GLOBAL_REPOSITORY
    }

    /// Add or overwrite every function and compiler of a module
    pub fn load_module(&mut self, module: &FunctionModule) {
        for (name, function) in module.functions() {
            if self
                .functions
                .insert(name.to_string(), Arc::clone(function))
                .is_some()
            {
                trace!("function {} overwritten by module load", name);
            }
        }
        for (key, compiler) in module.compilers() {
            if self.compilers.insert(*key, Arc::clone(compiler)).is_some() {
                trace!("compiler {:?} overwritten by module load", key);
            }
        }
        debug!(
            "loaded module: {} functions, {} compilers",
            module.len(),
            module.compilers().count()
        );
    }

    /// Register a single function, overwriting any function of the same name
    pub fn register(&mut self, function: impl Function) {
        let name = function.name().to_uppercase();
        self.functions.insert(name, Arc::new(function));
    }

    /// Register a compiler for the implementation type `F`
    pub fn register_compiler<F: Function>(&mut self, compiler: impl FunctionCompiler + 'static) {
        self.compilers.insert(TypeId::of::<F>(), Arc::new(compiler));
    }

    /// Look up a function by name
    ///
    /// Matching is case-insensitive and ignores a leading `_xlfn.` or
    /// `_xlws.` prefix.
    pub fn get_function(&self, name: &str) -> Option<&dyn Function> {
        self.functions
            .get(&normalize_name(name))
            .map(|f| f.as_ref())
    }

    /// Look up a function, failing for unknown names
    pub fn require(&self, name: &str) -> FormulaResult<&dyn Function> {
        self.get_function(name)
            .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))
    }

    /// Custom compiler for a function's implementation type
    pub fn get_compiler(&self, function: &dyn Function) -> Option<&dyn FunctionCompiler> {
        self.compilers
            .get(&function.type_key())
            .map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&normalize_name(name))
    }

    /// Registered names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    let stripped = FUTURE_FUNCTION_PREFIXES
        .iter()
        .find_map(|prefix| {
            name.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &name[prefix.len()..])
        })
        .unwrap_or(name);
    stripped.to_uppercase()
}
