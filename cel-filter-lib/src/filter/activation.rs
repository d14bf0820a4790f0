//! Per-evaluation variable bindings

use cel_interpreter::{Context, Value};
use core::fmt::{Debug, Formatter};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator};

/// The variables visible to every expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Variable {
    /// The object being admitted
    Object,

    /// The prior version of the object
    OldObject,

    /// The parameter object supplied with the policy
    Params,

    /// Admission request metadata
    Request,
}

impl Variable {
    /// Looks up a variable by its exact, case-sensitive name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Binds the four well-known variables to the values of a single admission request.
///
/// An activation is built at the start of each evaluation and dropped at its end. Absent
/// inputs are bound to `null`, so every [`Variable`] always resolves; any other name does not.
pub struct Activation {
    object: Value,
    old_object: Value,
    params: Value,
    request: Value,
    context: Context<'static>,
}

impl Activation {
    #[must_use]
    pub fn new(object: Value, old_object: Value, params: Value, request: Value) -> Self {
        let mut activation = Self {
            object,
            old_object,
            params,
            request,
            context: Context::default(),
        };

        for variable in Variable::iter() {
            let value = activation.resolve(variable).clone();
            activation.context.add_variable_from_value(variable.name(), value);
        }

        activation
    }

    #[must_use]
    pub const fn resolve(&self, variable: Variable) -> &Value {
        match variable {
            Variable::Object => &self.object,
            Variable::OldObject => &self.old_object,
            Variable::Params => &self.params,
            Variable::Request => &self.request,
        }
    }

    /// Returns the value bound to `name`, or `None` if the name is not one of the four variables
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<&Value> {
        Variable::from_name(name).map(|variable| self.resolve(variable))
    }

    /// The interpreter context holding the same bindings
    pub(crate) const fn context(&self) -> &Context<'static> {
        &self.context
    }
}

impl Debug for Activation {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Activation")
            .field("object", &self.object)
            .field("oldObject", &self.old_object)
            .field("params", &self.params)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
