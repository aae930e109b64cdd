// src/catalog/applications.rs

//! Application stack images published below `suse/`

use crate::error::Result;
use crate::image::{ContainerImage, ImageBuilder, ParseVersion, ReleaseStage, Replacement};

const THREE_EIGHT_NINE_DS_END: &str = r#"EXPOSE 3389 3636

RUN mkdir -p /data/config && \
    mkdir -p /data/ssca && \
    mkdir -p /data/run && \
    mkdir -p /var/run/dirsrv && \
    ln -s /data/config /etc/dirsrv/slapd-localhost && \
    ln -s /data/ssca /etc/dirsrv/ssca && \
    ln -s /data/run /var/run/dirsrv

VOLUME /data

HEALTHCHECK --start-period=5m --timeout=5s --interval=5s --retries=2 \
    CMD /usr/lib/dirsrv/dscontainer -H

CMD [ "/usr/lib/dirsrv/dscontainer", "-r" ]
"#;

/// Route the per-host tomcat logs to the console
const TOMCAT_END: &str = r#"RUN mkdir -p /var/log/tomcat; chown --recursive tomcat:tomcat /var/log/tomcat;
RUN \
    sed -i /etc/tomcat/logging.properties \
        -e 's|org\.apache\.catalina\.core\.ContainerBase\.\[Catalina\]\.\[localhost\]\.handlers =.*|org.apache.catalina.core.ContainerBase.[Catalina].[localhost].handlers = java.util.logging.ConsoleHandler|' \
        -e 's|org\.apache\.catalina\.core\.ContainerBase\.\[Catalina\]\.\[localhost\]\.\[/manager\]\.handlers =.*|org.apache.catalina.core.ContainerBase.[Catalina].[localhost].[/manager].handlers = java.util.logging.ConsoleHandler|' \
        -e 's|org\.apache\.catalina\.core\.ContainerBase\.\[Catalina\]\.\[localhost\]\.\[/host-manager\]\.handlers =.*|org.apache.catalina.core.ContainerBase.[Catalina].[localhost].[/host-manager].handlers = java.util.logging.ConsoleHandler|'

WORKDIR $CATALINA_HOME
"#;

const CATALINA_HOME: &str = "/usr/share/tomcat";

/// Supported tomcat major versions, oldest first
const TOMCAT_VERSIONS: [u8; 2] = [9, 10];

pub(super) fn images() -> Result<Vec<ContainerImage>> {
    let mut images = vec![three_eight_nine_ds()?];
    images.extend(tomcat()?);
    Ok(images)
}

fn three_eight_nine_ds() -> Result<ContainerImage> {
    ImageBuilder::application_stack("389-ds", "389 Directory Server", "1.4")
        .with_ibs_package("389-ds-container")
        .with_sp_version(4)
        .with_release_stage(ReleaseStage::Beta)
        .with_latest(true)
        .with_maintainer("wbrown@suse.de")
        .with_packages(["389-ds", "timezone", "openssl"])
        .with_custom_end(THREE_EIGHT_NINE_DS_END)
        .build()
}

fn tomcat() -> Result<Vec<ContainerImage>> {
    TOMCAT_VERSIONS
        .into_iter()
        .map(|major| {
            // the oldest version ships as plain `tomcat`
            let tomcat_pkg = if major == TOMCAT_VERSIONS[0] {
                "tomcat".to_string()
            } else {
                format!("tomcat{}", major)
            };

            ImageBuilder::application_stack(
                "apache-tomcat",
                format!("Apache Tomcat {}", major),
                major,
            )
            .with_ibs_package(format!("apache-tomcat-{}-image", major))
            .with_sp_version(4)
            .with_release_stage(ReleaseStage::Beta)
            .with_latest(major == TOMCAT_VERSIONS[TOMCAT_VERSIONS.len() - 1])
            .with_additional_versions(["%%tomcat_version%%", "%%tomcat_minor%%"])
            .with_packages([tomcat_pkg.as_str()])
            .with_replacement(Replacement::new("%%tomcat_version%%", tomcat_pkg.as_str()))
            .with_replacement(
                Replacement::new("%%tomcat_minor%%", tomcat_pkg.as_str())
                    .with_parse_version(ParseVersion::Minor),
            )
            .with_cmd(["/usr/lib/tomcat/server", "start"])
            .with_exposed_tcp_ports([8080])
            .with_env("TOMCAT_MAJOR", major)
            .with_env("TOMCAT_VERSION", "%%tomcat_version%%")
            .with_env("CATALINA_HOME", CATALINA_HOME)
            .with_env("CATALINA_BASE", CATALINA_HOME)
            .with_env("PATH", format!("{}/bin:$PATH", CATALINA_HOME))
            .with_custom_end(TOMCAT_END)
            .with_entrypoint_user("tomcat")
            .build()
        })
        .collect()
}
