use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/users/v1/users.proto");
    println!("cargo:rerun-if-changed=proto");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    // Prefer a system protoc when PROTOC is set, otherwise use the vendored binary.
    let mut config = prost_build::Config::new();
    if std::env::var_os("PROTOC").is_none() {
        config.protoc_executable(protoc_bin_vendored::protoc_bin_path()?);
    }
    // Descriptor set served through gRPC reflection.
    config.file_descriptor_set_path(out_dir.join("users_v1_descriptor.bin"));

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_with_config(config, &["proto/users/v1/users.proto"], &["proto"])?;

    Ok(())
}
