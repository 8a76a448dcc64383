//! Master API command names.
//!
//! Commands are path-like names grouped by entity:
//!
//! | Entity | Prefix |
//! |--------|--------|
//! | Activity | `/activity` |
//! | Live activity | `/liveactivity` |
//! | Live activity group | `/liveactivitygroup` |
//! | Space | `/space` |
//! | Space controller | `/spacecontroller` |
//! | Named script | `/admin/namedscript` |
//! | Domain model | `/admin/masterdomainmodel` |
//! | Extension | `/extension/<name>` |
//!
//! Any [`Command`] can be passed where a command name is expected since it
//! implements `AsRef<str>`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Prefix of extension commands.
pub const EXTENSION_PREFIX: &str = "/extension/";

// ============================================================================
// Command Wrapper
// ============================================================================

/// All master API commands organized by entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activity commands.
    Activity(ActivityCommand),
    /// Live activity commands.
    LiveActivity(LiveActivityCommand),
    /// Live activity group commands.
    LiveActivityGroup(LiveActivityGroupCommand),
    /// Space commands.
    Space(SpaceCommand),
    /// Space controller commands.
    SpaceController(SpaceControllerCommand),
    /// Named script commands.
    NamedScript(NamedScriptCommand),
    /// Domain model import/export.
    DomainModel(DomainModelCommand),
    /// Master version query.
    Version,
    /// Extension command, holding the full command name.
    Extension(String),
}

impl Command {
    /// Creates an extension command.
    #[must_use]
    pub fn extension(name: &str) -> Self {
        Self::Extension(format!("{EXTENSION_PREFIX}{name}"))
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Activity(c) => c.as_str(),
            Self::LiveActivity(c) => c.as_str(),
            Self::LiveActivityGroup(c) => c.as_str(),
            Self::Space(c) => c.as_str(),
            Self::SpaceController(c) => c.as_str(),
            Self::NamedScript(c) => c.as_str(),
            Self::DomainModel(c) => c.as_str(),
            Self::Version => "/interactivespaces/version",
            Self::Extension(name) => name,
        }
    }

    /// Returns the extension name for extension commands.
    #[must_use]
    pub fn extension_name(&self) -> Option<&str> {
        match self {
            Self::Extension(name) => name.strip_prefix(EXTENSION_PREFIX),
            _ => None,
        }
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a command enum with its wire names.
macro_rules! commands {
    (
        $(#[$meta:meta])*
        $name:ident => $wrap:ident {
            $($(#[$vmeta:meta])* $variant:ident = $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Returns the wire name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl From<$name> for Command {
            fn from(command: $name) -> Self {
                Command::$wrap(command)
            }
        }
    };
}

// ============================================================================
// Entity Commands
// ============================================================================

commands! {
    /// Activity (deployable bundle) commands.
    ActivityCommand => Activity {
        /// List activities.
        All = "/activity/all",
        /// View one activity.
        View = "/activity/view",
        /// View one activity with related entities.
        ViewFull = "/activity/view/FULL",
        /// Deploy every live activity of the activity.
        Deploy = "/activity/deploy",
        /// Update metadata.
        MetadataSet = "/activity/metadata/set",
        /// Delete from the master.
        DeleteLocal = "/activity/delete/local",
    }
}

commands! {
    /// Live activity commands.
    LiveActivityCommand => LiveActivity {
        /// List live activities.
        All = "/liveactivity/all",
        /// View one live activity.
        View = "/liveactivity/view",
        /// View one live activity with related entities.
        ViewFull = "/liveactivity/view/full",
        /// Create a live activity.
        Create = "/liveactivity/create",
        /// Deploy to its controller.
        Deploy = "/liveactivity/deploy",
        /// Push configuration to its controller.
        Configure = "/liveactivity/configure",
        /// Read configuration.
        ConfigurationGet = "/liveactivity/configuration/get",
        /// Write configuration.
        ConfigurationSet = "/liveactivity/configuration/set",
        /// Update metadata.
        MetadataSet = "/liveactivity/metadata/set",
        /// Start up.
        Startup = "/liveactivity/startup",
        /// Activate.
        Activate = "/liveactivity/activate",
        /// Deactivate.
        Deactivate = "/liveactivity/deactivate",
        /// Shut down.
        Shutdown = "/liveactivity/shutdown",
        /// Request a status report.
        Status = "/liveactivity/status",
        /// Delete from the master.
        DeleteLocal = "/liveactivity/delete/local",
        /// Delete from its controller.
        DeleteRemote = "/liveactivity/delete/remote",
        /// Clean permanent data.
        CleanPermanentData = "/liveactivity/data/permanent/clean",
        /// Clean temporary data.
        CleanTemporaryData = "/liveactivity/data/temporary/clean",
    }
}

commands! {
    /// Live activity group commands.
    LiveActivityGroupCommand => LiveActivityGroup {
        /// List groups.
        All = "/liveactivitygroup/all",
        /// View one group.
        View = "/liveactivitygroup/view",
        /// View one group with related entities.
        ViewFull = "/liveactivitygroup/view/full",
        /// Deploy every member.
        Deploy = "/liveactivitygroup/deploy",
        /// Configure every member.
        Configure = "/liveactivitygroup/configure",
        /// Update metadata.
        MetadataSet = "/liveactivitygroup/metadata/set",
        /// Start up.
        Startup = "/liveactivitygroup/startup",
        /// Activate.
        Activate = "/liveactivitygroup/activate",
        /// Deactivate.
        Deactivate = "/liveactivitygroup/deactivate",
        /// Shut down.
        Shutdown = "/liveactivitygroup/shutdown",
        /// Shut down every member regardless of other groups.
        ForceShutdown = "/liveactivitygroup/shutdown/force",
        /// Request a status report.
        Status = "/liveactivitygroup/status",
        /// Delete from the master.
        DeleteLocal = "/liveactivitygroup/delete/local",
    }
}

commands! {
    /// Space commands.
    SpaceCommand => Space {
        /// List spaces.
        All = "/space/all",
        /// View one space.
        View = "/space/view",
        /// View one space with related entities.
        ViewFull = "/space/view/full",
        /// Deploy every member.
        Deploy = "/space/deploy",
        /// Configure every member.
        Configure = "/space/configure",
        /// Update metadata.
        MetadataSet = "/space/metadata/set",
        /// Start up.
        Startup = "/space/startup",
        /// Activate.
        Activate = "/space/activate",
        /// Deactivate.
        Deactivate = "/space/deactivate",
        /// Shut down.
        Shutdown = "/space/shutdown",
        /// Request a status report.
        Status = "/space/status",
        /// Delete from the master.
        DeleteLocal = "/space/delete/local",
    }
}

commands! {
    /// Space controller commands.
    SpaceControllerCommand => SpaceController {
        /// List controllers.
        All = "/spacecontroller/all",
        /// View one controller.
        View = "/spacecontroller/view",
        /// View one controller with related entities.
        ViewFull = "/spacecontroller/view/full",
        /// Push configuration.
        Configure = "/spacecontroller/configure",
        /// Read configuration.
        ConfigurationGet = "/spacecontroller/configuration/get",
        /// Write configuration.
        ConfigurationSet = "/spacecontroller/configuration/set",
        /// Update metadata.
        MetadataSet = "/spacecontroller/metadata/set",
        /// Connect.
        Connect = "/spacecontroller/connect",
        /// Disconnect.
        Disconnect = "/spacecontroller/disconnect",
        /// Connect every controller.
        ConnectAll = "/spacecontroller/all/connect",
        /// Disconnect every controller.
        DisconnectAll = "/spacecontroller/all/disconnect",
        /// Request a status report.
        Status = "/spacecontroller/status",
        /// Request a status report from every controller.
        StatusAll = "/spacecontroller/all/status",
        /// Deploy every live activity on the controller.
        Deploy = "/spacecontroller/deploy",
        /// Deploy every live activity on every controller.
        DeployAll = "/spacecontroller/all/deploy",
        /// Shut down the controller.
        Shutdown = "/spacecontroller/shutdown",
        /// Shut down every controller.
        ShutdownAll = "/spacecontroller/all/shutdown",
        /// Shut down every live activity on the controller.
        ShutdownLiveActivities = "/spacecontroller/liveactivities/shutdown",
        /// Delete from the master.
        DeleteLocal = "/spacecontroller/delete",
    }
}

commands! {
    /// Named script commands.
    NamedScriptCommand => NamedScript {
        /// List scripts.
        All = "/admin/namedscript/all",
        /// View one script.
        View = "/admin/namedscript/view",
        /// Update metadata.
        MetadataSet = "/admin/namedscript/metadata/set",
        /// Run.
        Run = "/admin/namedscript/run",
        /// Delete.
        Delete = "/admin/namedscript/delete",
    }
}

commands! {
    /// Master domain model commands.
    DomainModelCommand => DomainModel {
        /// Import a model.
        Import = "/admin/masterdomainmodel/import",
        /// Export the model.
        Export = "/admin/masterdomainmodel/export",
    }
}

// ============================================================================
// Argument Builders
// ============================================================================

/// Builders for the common `data` shapes the master expects.
pub mod args {
    use serde_json::{Map, Value, json};

    /// Metadata update mode for `metadata/set` commands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetadataMode {
        /// Replace all metadata.
        Replace,
        /// Merge into existing metadata.
        Modify,
        /// Remove the listed keys.
        Delete,
    }

    impl MetadataMode {
        /// Returns the wire name.
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Replace => "replace",
                Self::Modify => "modify",
                Self::Delete => "delete",
            }
        }
    }

    /// `{ "id": id }`
    #[must_use]
    pub fn entity(id: &str) -> Value {
        json!({ "id": id })
    }

    /// `{ "filter": filter }`, or `{}` without a filter.
    #[must_use]
    pub fn filter(filter: Option<&str>) -> Value {
        match filter {
            Some(filter) => json!({ "filter": filter }),
            None => Value::Object(Map::new()),
        }
    }

    /// `{ "id": id, "config": config }`
    #[must_use]
    pub fn config(id: &str, config: Value) -> Value {
        json!({ "id": id, "config": config })
    }

    /// `{ "id": id, "metadata": metadata }` wrapped in the update mode.
    #[must_use]
    pub fn metadata(id: &str, mode: MetadataMode, metadata: Value) -> Value {
        json!({
            "id": id,
            "metadata": { "command": mode.as_str(), "data": metadata },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::args::{self, MetadataMode};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_command_names() {
        assert_eq!(LiveActivityCommand::All.as_str(), "/liveactivity/all");
        assert_eq!(
            SpaceControllerCommand::ConnectAll.as_str(),
            "/spacecontroller/all/connect"
        );
        assert_eq!(ActivityCommand::ViewFull.as_str(), "/activity/view/FULL");
    }

    #[test]
    fn test_command_wrapper() {
        let command: Command = SpaceCommand::Startup.into();
        assert_eq!(command.as_str(), "/space/startup");
        assert_eq!(command.to_string(), "/space/startup");
        assert_eq!(Command::Version.as_ref(), "/interactivespaces/version");
    }

    #[test]
    fn test_extension_command() {
        let command = Command::extension("reports");
        assert_eq!(command.as_str(), "/extension/reports");
        assert_eq!(command.extension_name(), Some("reports"));
        assert_eq!(Command::Version.extension_name(), None);
    }

    #[test]
    fn test_args() {
        assert_eq!(args::entity("7"), json!({"id": "7"}));
        assert_eq!(args::filter(None), json!({}));
        assert_eq!(
            args::filter(Some("metadata.room == 'lobby'")),
            json!({"filter": "metadata.room == 'lobby'"})
        );
        assert_eq!(
            args::metadata("3", MetadataMode::Modify, json!({"room": "lobby"})),
            json!({"id": "3", "metadata": {"command": "modify", "data": {"room": "lobby"}}})
        );
    }
}
