// src/image/recipe.rs

//! Recipe fragments derived from an image descriptor
//!
//! These are the pieces of the `Dockerfile`, the kiwi build description and
//! kiwi's `config.sh` that depend on the image rather than on the template:
//! environment, extra labels, entrypoint and the custom tail.

use chrono::Datelike;
use serde::Serialize;

use super::{ContainerImage, xml_escape};
use crate::error::{Error, Result};

/// An entrypoint split into kiwi's `execute` attribute and `<argument>`s
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KiwiEntrypoint {
    pub execute: String,
    pub arguments: Vec<String>,
}

impl ContainerImage {
    /// `ENV` instructions for every environment variable
    pub fn env_lines(&self) -> String {
        self.env
            .iter()
            .map(|(k, v)| format!("ENV {}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `<environment>` element for the kiwi `<containerconfig>`
    ///
    /// Empty when the image sets no environment.
    pub fn kiwi_env_entry(&self) -> String {
        if self.env.is_empty() {
            return String::new();
        }

        let mut res = String::from("        <environment>\n");
        for (k, v) in &self.env {
            res.push_str(&format!(
                "          <env name=\"{}\" value=\"{}\"/>\n",
                xml_escape(k),
                xml_escape(v)
            ));
        }
        res.push_str("        </environment>\n");
        res
    }

    /// Extra labels as `Dockerfile` instructions
    pub fn extra_label_lines(&self) -> String {
        self.extra_labels
            .iter()
            .map(|(k, v)| format!("LABEL {}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Extra labels as kiwi `<label>` elements
    pub fn extra_label_xml_lines(&self) -> String {
        self.extra_labels
            .iter()
            .map(|(k, v)| {
                format!(
                    "            <label name=\"{}\" value=\"{}\"/>",
                    xml_escape(k),
                    xml_escape(v)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Instructions appended to the end of the `Dockerfile`
    ///
    /// The custom tail when set, otherwise the config.sh script as a single
    /// `RUN` instruction. The script must therefore fit on one line (or
    /// escape its newlines) to be usable by both build types.
    pub fn dockerfile_custom_end(&self) -> String {
        if !self.custom_end.is_empty() {
            return self.custom_end.clone();
        }
        if !self.config_sh_script.is_empty() {
            return format!("RUN {}", self.config_sh_script);
        }
        String::new()
    }

    /// The complete kiwi `config.sh`, `None` if the image has no script
    ///
    /// Fails for images with a custom `Dockerfile` tail: those cannot be
    /// built by kiwi.
    pub fn config_sh(&self) -> Result<Option<String>> {
        if self.config_sh_script.is_empty() {
            if !self.custom_end.is_empty() {
                return Err(Error::KiwiCustomEnd(self.pretty_name.clone()));
            }
            return Ok(None);
        }

        let year = chrono::Local::now().year();
        Ok(Some(format!(
            r#"#!/bin/bash -e

# Copyright (c) {year} SUSE LLC, Nuernberg, Germany.
#
# All modifications and additions to the file contributed by third parties
# remain the property of their copyright owners, unless otherwise agreed
# upon. The license for this file, and modifications and additions to the
# file, is the same license as for the pristine package itself (unless the
# license for the pristine package is not an Open Source License, in which
# case the license is the MIT License). An "Open Source License" is a
# license that conforms to the Open Source Definition (Version 1.9)
# published by the Open Source Initiative.

test -f /.kconfig && . /.kconfig
test -f /.profile && . /.profile

echo "Configure image: [$kiwi_iname]..."

#======================================
# Setup baseproduct link
#--------------------------------------
if [ ! -e /etc/products.d/baseproduct ]; then
    suseSetupProduct
fi

#======================================
# Import repositories' keys
#--------------------------------------
suseImportBuildKey

{script}

exit 0
"#,
            script = self.config_sh_script
        )))
    }

    /// Split an exec-form entrypoint (`["cmd", "arg"]`) into its parts
    fn entrypoint_parts(&self) -> Result<Option<Vec<String>>> {
        let Some(entrypoint) = self.entrypoint.as_deref() else {
            return Ok(None);
        };

        if !entrypoint.trim_start().starts_with('[') {
            return Ok(Some(vec![entrypoint.to_string()]));
        }

        let parts: Vec<String> =
            serde_json::from_str(entrypoint).map_err(|e| Error::InvalidEntrypoint {
                entrypoint: entrypoint.to_string(),
                reason: e.to_string(),
            })?;
        if parts.is_empty() {
            return Err(Error::InvalidEntrypoint {
                entrypoint: entrypoint.to_string(),
                reason: "empty exec form".to_string(),
            });
        }
        Ok(Some(parts))
    }

    /// The entrypoint in `Dockerfile` exec form
    pub fn dockerfile_entrypoint(&self) -> Result<Option<String>> {
        Ok(self
            .entrypoint_parts()?
            .map(|parts| to_exec_form(&parts)))
    }

    /// The default command in `Dockerfile` exec form
    pub fn dockerfile_cmd(&self) -> Option<String> {
        if self.cmd.is_empty() {
            None
        } else {
            Some(to_exec_form(&self.cmd))
        }
    }

    /// The entrypoint as kiwi `execute` plus arguments
    pub fn kiwi_entrypoint(&self) -> Result<Option<KiwiEntrypoint>> {
        Ok(self.entrypoint_parts()?.map(|mut parts| {
            let execute = parts.remove(0);
            KiwiEntrypoint {
                execute,
                arguments: parts,
            }
        }))
    }
}

fn to_exec_form(parts: &[String]) -> String {
    let quoted: Vec<String> = parts
        .iter()
        .map(|p| serde_json::Value::String(p.clone()).to_string())
        .collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageBuilder, ReleaseStage};

    fn builder() -> ImageBuilder {
        ImageBuilder::language_stack("postgres", "PostgreSQL 14", 14)
            .with_ibs_package("postgres-14-image")
            .with_sp_version(4)
            .with_release_stage(ReleaseStage::Beta)
            .with_packages(["postgresql14-server"])
    }

    #[test]
    fn test_env_lines() {
        let image = builder()
            .with_env("LANG", "en_US.utf8")
            .with_env("PG_MAJOR", 14)
            .build()
            .unwrap();

        assert_eq!(image.env_lines(), "ENV LANG=\"en_US.utf8\"\nENV PG_MAJOR=\"14\"");
        assert_eq!(
            image.kiwi_env_entry(),
            "        <environment>\n          <env name=\"LANG\" value=\"en_US.utf8\"/>\n          <env name=\"PG_MAJOR\" value=\"14\"/>\n        </environment>\n"
        );
    }

    #[test]
    fn test_no_env() {
        let image = builder().build().unwrap();
        assert_eq!(image.env_lines(), "");
        assert_eq!(image.kiwi_env_entry(), "");
    }

    #[test]
    fn test_extra_labels() {
        let image = builder()
            .with_label("usage", "Use <systemctl> & friends")
            .build()
            .unwrap();

        assert_eq!(image.extra_label_lines(), "LABEL usage=\"Use <systemctl> & friends\"");
        assert_eq!(
            image.extra_label_xml_lines(),
            "            <label name=\"usage\" value=\"Use &lt;systemctl&gt; &amp; friends\"/>"
        );
    }

    #[test]
    fn test_dockerfile_custom_end() {
        let image = builder().with_custom_end("EXPOSE 5432").build().unwrap();
        assert_eq!(image.dockerfile_custom_end(), "EXPOSE 5432");

        let image = builder()
            .with_config_sh_script("sed -i 's/a/b/' /etc/gemrc")
            .build()
            .unwrap();
        assert_eq!(image.dockerfile_custom_end(), "RUN sed -i 's/a/b/' /etc/gemrc");

        assert_eq!(builder().build().unwrap().dockerfile_custom_end(), "");
    }

    #[test]
    fn test_config_sh() {
        let image = builder()
            .with_config_sh_script("ln -s /usr/bin/python3.9 /usr/bin/python3")
            .build()
            .unwrap();
        let script = image.config_sh().unwrap().unwrap();

        assert!(script.starts_with("#!/bin/bash -e\n"));
        assert!(script.contains(&format!("Copyright (c) {}", chrono::Local::now().year())));
        assert!(script.contains("suseImportBuildKey\n\nln -s /usr/bin/python3.9 /usr/bin/python3\n\nexit 0\n"));

        assert!(builder().build().unwrap().config_sh().unwrap().is_none());
    }

    #[test]
    fn test_config_sh_with_custom_end_fails() {
        let image = builder().with_custom_end("EXPOSE 5432").build().unwrap();
        assert!(matches!(image.config_sh(), Err(Error::KiwiCustomEnd(_))));
    }

    #[test]
    fn test_entrypoint_forms() {
        let image = builder().with_entrypoint("jshell").build().unwrap();
        assert_eq!(image.dockerfile_entrypoint().unwrap().as_deref(), Some("[\"jshell\"]"));
        assert_eq!(
            image.kiwi_entrypoint().unwrap(),
            Some(KiwiEntrypoint {
                execute: "jshell".to_string(),
                arguments: vec![],
            })
        );

        let image = builder()
            .with_entrypoint(r#"["docker-entrypoint.sh", "-v"]"#)
            .build()
            .unwrap();
        assert_eq!(
            image.dockerfile_entrypoint().unwrap().as_deref(),
            Some("[\"docker-entrypoint.sh\", \"-v\"]")
        );
        let kiwi = image.kiwi_entrypoint().unwrap().unwrap();
        assert_eq!(kiwi.execute, "docker-entrypoint.sh");
        assert_eq!(kiwi.arguments, vec!["-v"]);

        assert!(builder().build().unwrap().dockerfile_entrypoint().unwrap().is_none());
    }

    #[test]
    fn test_invalid_entrypoint() {
        let image = builder().with_entrypoint("[\"unterminated").build().unwrap();
        assert!(matches!(
            image.dockerfile_entrypoint(),
            Err(Error::InvalidEntrypoint { .. })
        ));

        let image = builder().with_entrypoint("[]").build().unwrap();
        assert!(image.kiwi_entrypoint().is_err());
    }

    #[test]
    fn test_dockerfile_cmd() {
        let image = builder().with_cmd(["postgres"]).build().unwrap();
        assert_eq!(image.dockerfile_cmd().as_deref(), Some("[\"postgres\"]"));
        assert!(builder().build().unwrap().dockerfile_cmd().is_none());
    }
}
