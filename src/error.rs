use thiserror::Error;

/// Errors reported by [`crate::compilation::CompilationBuilder::freeze`].
///
/// These cover malformed symbol graphs handed over by the front-end
/// adapter. Malformed *suppression* inputs are never errors; they
/// degrade to "matches nothing" (see `crate::index`).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("member `{name}` must be owned by a type (or by a property/event for accessors)")]
    InvalidMemberOwner { name: String },

    #[error("accessor `{name}` must be owned by a property or event")]
    InvalidAccessorOwner { name: String },

    #[error("type `{name}` must be owned by a namespace or another type")]
    InvalidTypeOwner { name: String },

    #[error("declaring span on `{name}` is empty ({start}..{end})")]
    EmptySpan { name: String, start: u32, end: u32 },

    #[error(
        "declaring spans {first_start}..{first_end} and {second_start}..{second_end} \
         in file `{file}` partially overlap"
    )]
    OverlappingSpans {
        file: String,
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },
}
