use std::path::Path;

use quote::quote;

const ENTRYPOINT_VAR: &str = "BUNDLE_LAUNCHER_ENTRYPOINT";
const PROGRAM_NAME_VAR: &str = "BUNDLE_LAUNCHER_PROGRAM_NAME";
const DEFAULT_ENTRYPOINT: &str = "app";

fn var(name: &str) -> Option<String> {
    println!("cargo:rerun-if-env-changed={name}");

    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn main() {
    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("entrypoint.rs");

    let entrypoint = var(ENTRYPOINT_VAR).unwrap_or_else(|| DEFAULT_ENTRYPOINT.to_owned());
    if entrypoint.contains(['/', '\\', '\0']) || entrypoint == "." || entrypoint == ".." {
        panic!("`{ENTRYPOINT_VAR}` must be a plain file name, got `{entrypoint}`");
    }
    let program_name = var(PROGRAM_NAME_VAR).unwrap_or_else(|| entrypoint.clone());
    if program_name.contains('\0') {
        panic!("`{PROGRAM_NAME_VAR}` must not contain a NUL byte");
    }

    let tokens = quote! {
        /// Name of the program executed from the bundle's `lib` directory.
        pub const ENTRYPOINT: &str = #entrypoint;

        /// Value given to the entrypoint as its argument zero.
        pub const PROGRAM_NAME: &str = #program_name;
    };

    std::fs::write(dest_path, tokens.to_string()).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
