//! Message trait and type-name helpers.

use std::any::Any;

use crate::dump::Dump;

/// Upcast helper so trait objects can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A payload dispatched through a [`MessageBus`](super::MessageBus).
///
/// Messages opt into dumping by implementing [`Dump`]; the default
/// `type_name` comes from the compiler and is only used for display.
pub trait Message: Dump + AsAny + Send + Sync {
    /// Fully qualified type identifier.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Final segment of [`type_name`](Message::type_name).
    fn short_name(&self) -> &str {
        short_type_name(self.type_name())
    }
}

impl dyn Message {
    /// Downcast to the concrete message type.
    pub fn downcast_ref<T: Message + Any>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn is<T: Message + Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

/// Strip module qualifiers and generic arguments from a type path.
///
/// Accepts `::`, `.` and `\` as separators, so names produced by other
/// registries resolve the same way:
///
/// ```
/// use log_to_panel::bus::short_type_name;
///
/// assert_eq!(short_type_name("app::commands::CreateOrder"), "CreateOrder");
/// assert_eq!(short_type_name("App.Commands.CreateOrder"), "CreateOrder");
/// assert_eq!(short_type_name("app::Wrapper<app::Inner>"), "Wrapper");
/// ```
pub fn short_type_name(full: &str) -> &str {
    let base = match full.find('<') {
        Some(index) => &full[..index],
        None => full,
    };
    base.rsplit(|c: char| c == ':' || c == '.' || c == '\\')
        .next()
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_without_separator_is_unchanged() {
        assert_eq!(short_type_name("Ping"), "Ping");
    }

    #[test]
    fn short_name_of_backslash_path() {
        assert_eq!(short_type_name("App\\Commands\\CreateOrder"), "CreateOrder");
    }

    #[test]
    fn short_name_ignores_nested_generic_paths() {
        assert_eq!(
            short_type_name("core::option::Option<alloc::string::String>"),
            "Option"
        );
    }

    #[test]
    fn short_name_of_empty_path() {
        assert_eq!(short_type_name(""), "");
    }
}
