//! List templates bundled with the binary.

/// Default templates as `(name, source)` pairs. Names carry no extension.
pub const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("listgrant", include_str!("../templates/listgrant.md")),
    ("listmeeting", include_str!("../templates/listmeeting.md")),
    ("listpaper", include_str!("../templates/listpaper.md")),
    ("listpdra", include_str!("../templates/listpdra.md")),
    ("liststudent", include_str!("../templates/liststudent.md")),
    ("listtalk", include_str!("../templates/listtalk.md")),
    ("listteaching", include_str!("../templates/listteaching.md")),
];

/// Extension appended to template names when none is configured.
pub const DEFAULT_EXTENSION: &str = ".md";
