// Decides which messages get generated JSON methods.

use crate::descriptor::{FileDescriptor, MessageDescriptor};

/// Whether `message` gets `MarshalJSON`/`UnmarshalJSON` methods.
///
/// Messages without a Go type declaration have nothing to attach methods to,
/// and map entries are only ever serialized as part of their map.
pub fn needs_json_methods(file: &FileDescriptor<'_>, message: &MessageDescriptor<'_>) -> bool {
    debug_assert!(
        file.messages().iter().any(|m| std::ptr::eq(m, message)),
        "message {} does not belong to {}",
        message.name(),
        file.name()
    );

    message.has_type_decl() && !message.is_map_entry()
}
