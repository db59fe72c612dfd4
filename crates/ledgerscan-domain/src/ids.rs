//! Opaque identifiers issued by the remote assistant service

use std::fmt;

macro_rules! remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string returned by the service
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

remote_id! {
    /// Identifier of an uploaded file
    ///
    /// Only valid for the session that produced it; never reused across
    /// source files.
    FileId
}

remote_id! {
    /// Identifier of a conversation thread (one per source file)
    ThreadId
}

remote_id! {
    /// Identifier of a run, bound to exactly one thread and one uploaded file
    RunId
}
