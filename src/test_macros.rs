#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! text_from_relative_file {
    ($f : expr) => {{
        let path = $crate::relative_file!($f);
        fs::read_to_string(path).unwrap()
    }};
}
