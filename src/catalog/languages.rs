// src/catalog/languages.rs

//! Language stack images: Python, Ruby, Golang, Node.js, OpenJDK and Rust

use crate::error::Result;
use crate::image::{
    BuildType, ContainerImage, FromImage, ImageBuilder, Package, PackageType, ParseVersion,
    ReleaseStage, Replacement,
};

/// Go binaries are large and fail to build on workers with a 4 GB root
const GOLANG_CONSTRAINTS: &str = r#"<constraints>
  <hardware>
    <disk>
      <size unit="G">6</size>
    </disk>
  </hardware>
</constraints>
"#;

const GOLANG_PATH: &str =
    "/go/bin:/usr/local/go/bin:/root/go/bin/:/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

pub(super) fn images() -> Result<Vec<ContainerImage>> {
    let mut images = python()?;
    images.extend(ruby()?);
    images.extend(golang()?);
    images.extend(nodejs()?);
    images.extend(openjdk()?);
    images.extend(rust()?);
    Ok(images)
}

fn python() -> Result<Vec<ContainerImage>> {
    let mut images = Vec::new();

    for (sp_version, ibs_package, build_type, release_stage) in [
        (3, "python-3.6", BuildType::Kiwi, ReleaseStage::Released),
        (4, "python-3.6-image", BuildType::Docker, ReleaseStage::Beta),
    ] {
        images.push(
            ImageBuilder::language_stack("python", "Python 3.6", "3.6")
                .with_ibs_package(ibs_package)
                .with_sp_version(sp_version)
                .with_release_stage(release_stage)
                .with_build_type(build_type)
                .with_custom_description(
                    "Image containing the Python 3.6 development environment based on the SLE Base Container Image.",
                )
                .with_env("PYTHON_VERSION", "%%py3_ver%%")
                .with_env("PIP_VERSION", "%%pip_ver%%")
                .with_replacement(Replacement::new("%%py3_ver%%", "python3-base"))
                .with_replacement(Replacement::new("%%pip_ver%%", "python3-pip"))
                .with_packages(["python3", "python3-pip", "python3-wheel", "curl", "git-core"])
                .build()?,
        );
    }

    images.push(
        ImageBuilder::language_stack("python", "Python 3.9", "3.9")
            .with_ibs_package("python-3.9")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_build_type(BuildType::Kiwi)
            .with_latest(true)
            .with_custom_description(
                "Image containing the Python 3.9 development environment based on the SLE Base Container Image.",
            )
            .with_env("PYTHON_VERSION", "%%py39_ver%%")
            .with_env("PIP_VERSION", "%%pip_ver%%")
            .with_replacement(Replacement::new("%%py39_ver%%", "python39-base"))
            .with_replacement(Replacement::new("%%pip_ver%%", "python39-pip"))
            .with_packages(["python39", "python39-pip", "curl", "git-core"])
            .with_config_sh_script(
                r#"rpm -e --nodeps $(rpm -qa|grep libpython3_6) python3-base && \
    ln -s /usr/bin/python3.9 /usr/bin/python3 && \
    ln -s /usr/bin/pip3.9 /usr/bin/pip3 && \
    ln -s /usr/bin/pip3.9 /usr/bin/pip"#,
            )
            .build()?,
    );

    Ok(images)
}

fn ruby() -> Result<Vec<ContainerImage>> {
    let ruby = |sp_version: u8| {
        ImageBuilder::language_stack("ruby", "Ruby 2.5", "2.5")
            .with_ibs_package("ruby-2.5-image")
            .with_sp_version(sp_version)
            // upstream sets a UTF-8 locale
            .with_env("LANG", "C.UTF-8")
            .with_env("RUBY_VERSION", "%%rb_ver%%")
            .with_env("RUBY_MAJOR", "%%rb_maj%%")
            .with_replacement(Replacement::new("%%rb_ver%%", "ruby2.5"))
            .with_replacement(
                Replacement::new("%%rb_maj%%", "ruby2.5").with_parse_version(ParseVersion::Minor),
            )
            .with_packages([
                "ruby2.5",
                "ruby2.5-rubygem-bundler",
                "ruby2.5-devel",
                "curl",
                "git-core",
                "distribution-release",
                // needed to build the rails, ffi and sqlite3 gems
                "gcc-c++",
                "sqlite3-devel",
                "make",
                "awk",
                "timezone",
            ])
            // gem binaries are installed as `bin`, not `bin.ruby2.5`
            .with_config_sh_script(
                "sed -i 's/--format-executable/--no-format-executable/' /etc/gemrc",
            )
    };

    Ok(vec![
        ruby(3)
            .with_release_stage(ReleaseStage::Released)
            .with_build_type(BuildType::Kiwi)
            .with_latest(true)
            .build()?,
        ruby(4).with_release_stage(ReleaseStage::Beta).build()?,
    ])
}

fn golang() -> Result<Vec<ContainerImage>> {
    let mut images = Vec::new();

    for ver in ["1.16", "1.17"] {
        for sp_version in [3u8, 4] {
            let sp3 = sp_version == 3;
            let (ibs_package, release_stage, build_type, pkg_type) = if sp3 {
                (
                    format!("golang-{}", ver),
                    ReleaseStage::Released,
                    BuildType::Kiwi,
                    PackageType::Bootstrap,
                )
            } else {
                (
                    format!("golang-{}-image", ver),
                    ReleaseStage::Beta,
                    BuildType::Docker,
                    PackageType::Image,
                )
            };

            images.push(
                ImageBuilder::language_stack("golang", format!("Golang {}", ver), ver)
                    .with_ibs_package(ibs_package)
                    .with_sp_version(sp_version)
                    .with_release_stage(release_stage)
                    .with_build_type(build_type)
                    .with_latest(ver == "1.17" && sp3)
                    .with_custom_description(format!(
                        "Image containing the Golang {} development environment based on the SLE Base Container Image.",
                        ver
                    ))
                    .with_env("GOLANG_VERSION", ver)
                    .with_env("PATH", GOLANG_PATH)
                    .with_packages(
                        [format!("go{}", ver).as_str(), "distribution-release", "make"]
                            .map(|name| Package::with_type(name, pkg_type)),
                    )
                    .with_extra_file("_constraints", GOLANG_CONSTRAINTS)
                    .build()?,
            );
        }
    }

    Ok(images)
}

fn nodejs() -> Result<Vec<ContainerImage>> {
    let mut images = Vec::new();

    for ver in [12u8, 14, 16] {
        for sp_version in [3u8, 4] {
            let sp3 = sp_version == 3;
            let ibs_package = if sp3 {
                format!("nodejs-{}", ver)
            } else {
                format!("nodejs-{}-image", ver)
            };

            images.push(
                ImageBuilder::language_stack("nodejs", format!("Node.js {}", ver), ver)
                    .with_ibs_package(ibs_package)
                    .with_sp_version(sp_version)
                    .with_release_stage(ReleaseStage::Released)
                    .with_build_type(if sp3 { BuildType::Kiwi } else { BuildType::Docker })
                    .with_latest(ver == 14 && sp3)
                    .with_additional_names(["node"])
                    .with_custom_description(format!(
                        "Image containing the Node.js {} development environment based on the SLE Base Container Image.",
                        ver
                    ))
                    .with_env("NODE_VERSION", ver)
                    .with_packages([
                        format!("nodejs{}", ver),
                        format!("npm{}", ver),
                        "git-core".to_string(),
                        "update-alternatives".to_string(),
                        "distribution-release".to_string(),
                    ])
                    .build()?,
            );
        }
    }

    Ok(images)
}

fn openjdk() -> Result<Vec<ContainerImage>> {
    let mut images = Vec::new();

    for sp_version in [3u8, 4] {
        for devel in [true, false] {
            let sp3 = sp_version == 3;
            let ibs_package = format!(
                "openjdk-11{}{}",
                if devel { "-devel" } else { "" },
                if sp3 { "" } else { "-image" }
            );

            let builder = if devel {
                ImageBuilder::language_stack("openjdk-devel", "OpenJDK 11 Development", 11)
                    .with_custom_labelprefix_end("openjdk.devel")
                    .with_custom_description(
                        "Image containing the Java 11 Development environment based on the SLE Base Container Image.",
                    )
                    .with_packages(["java-11-openjdk-devel", "git-core", "maven"])
                    .with_entrypoint("jshell")
                    .with_from_image(FromImage::Image("bci/openjdk:11".to_string()))
            } else {
                ImageBuilder::language_stack("openjdk", "OpenJDK 11 Runtime", 11)
                    .with_custom_description(
                        "Image containing the Java 11 runtime based on the SLE Base Container Image.",
                    )
                    .with_packages(["java-11-openjdk"])
            };

            images.push(
                builder
                    .with_ibs_package(ibs_package)
                    .with_sp_version(sp_version)
                    .with_release_stage(if sp3 {
                        ReleaseStage::Released
                    } else {
                        ReleaseStage::Beta
                    })
                    .with_build_type(if sp3 { BuildType::Kiwi } else { BuildType::Docker })
                    .with_latest(sp3)
                    .with_env("JAVA_BINDIR", "/usr/lib64/jvm/java/bin")
                    .with_env("JAVA_HOME", "/usr/lib64/jvm/java")
                    .with_env("JAVA_ROOT", "/usr/lib64/jvm/java")
                    .with_env("JAVA_VERSION", "11")
                    .build()?,
            );
        }
    }

    Ok(images)
}

fn rust() -> Result<Vec<ContainerImage>> {
    ["1.56", "1.57"]
        .into_iter()
        .map(|ver| {
            ImageBuilder::language_stack("rust", format!("Rust {}", ver), ver)
                .with_ibs_package(format!("rust-{}-image", ver))
                .with_sp_version(4)
                .with_release_stage(ReleaseStage::Beta)
                .with_latest(ver == "1.57")
                .with_env("RUST_VERSION", ver)
                .with_packages([
                    format!("rust{}", ver),
                    format!("cargo{}", ver),
                    "distribution-release".to_string(),
                ])
                .build()
        })
        .collect()
}
