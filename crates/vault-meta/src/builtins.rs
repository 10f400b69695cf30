//! Built-in plugin set for common Windows applications

use crate::{Catalog, ResourceSpec};

struct Builtin {
    name: &'static str,
    folders: &'static [&'static str],
    registry: &'static [&'static str],
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "Google Chrome",
        folders: &[r"%LOCALAPPDATA%\Google\Chrome\User Data\Default"],
        registry: &[r"HKEY_CURRENT_USER\Software\Google\Chrome"],
    },
    Builtin {
        name: "Mozilla Firefox",
        folders: &[r"%APPDATA%\Mozilla\Firefox\Profiles"],
        registry: &[r"HKEY_CURRENT_USER\Software\Mozilla"],
    },
    Builtin {
        name: "Opera",
        folders: &[r"%APPDATA%\Opera Software\Opera Stable"],
        registry: &[r"HKEY_CURRENT_USER\Software\Opera Software"],
    },
    Builtin {
        name: "Vivaldi",
        folders: &[r"%LOCALAPPDATA%\Vivaldi\User Data\Default"],
        registry: &[r"HKEY_CURRENT_USER\Software\Vivaldi"],
    },
    Builtin {
        name: "Microsoft Edge",
        folders: &[r"%LOCALAPPDATA%\Microsoft\Edge\User Data\Default"],
        registry: &[r"HKEY_CURRENT_USER\Software\Microsoft\Edge"],
    },
    Builtin {
        name: "Brave",
        folders: &[r"%LOCALAPPDATA%\BraveSoftware\Brave-Browser\User Data\Default"],
        registry: &[r"HKEY_CURRENT_USER\Software\BraveSoftware"],
    },
    Builtin {
        name: "Telegram",
        folders: &[r"%APPDATA%\Telegram Desktop"],
        registry: &[],
    },
    Builtin {
        name: "Discord",
        folders: &[r"%APPDATA%\discord"],
        registry: &[r"HKEY_CURRENT_USER\Software\Discord"],
    },
    Builtin {
        name: "Skype",
        folders: &[r"%APPDATA%\Skype"],
        registry: &[],
    },
    Builtin {
        name: "Zoom",
        folders: &[r"%APPDATA%\Zoom"],
        registry: &[r"HKEY_CURRENT_USER\Software\Zoom"],
    },
    Builtin {
        name: "WhatsApp Desktop",
        folders: &[r"%APPDATA%\WhatsApp"],
        registry: &[],
    },
    Builtin {
        name: "Visual Studio Code",
        folders: &[r"%APPDATA%\Code\User"],
        registry: &[],
    },
    Builtin {
        name: "Notepad++",
        folders: &[r"%APPDATA%\Notepad++"],
        registry: &[],
    },
    Builtin {
        name: "Sublime Text 3",
        folders: &[r"%APPDATA%\Sublime Text 3"],
        registry: &[],
    },
    Builtin {
        name: "IntelliJ IDEA",
        folders: &[r"%APPDATA%\JetBrains\IntelliJIdea2023.1"],
        registry: &[],
    },
    Builtin {
        name: "PyCharm",
        folders: &[r"%APPDATA%\JetBrains\PyCharm2023.1"],
        registry: &[],
    },
    Builtin {
        name: "Git",
        folders: &[],
        registry: &[r"HKEY_CURRENT_USER\Software\GitForWindows"],
    },
    Builtin {
        name: "GitHub Desktop",
        folders: &[r"%APPDATA%\GitHub Desktop"],
        registry: &[],
    },
    Builtin {
        name: "Postman",
        folders: &[r"%APPDATA%\Postman"],
        registry: &[],
    },
    Builtin {
        name: "Node.js",
        folders: &[],
        registry: &[r"HKEY_LOCAL_MACHINE\SOFTWARE\Node.js"],
    },
    Builtin {
        name: "Python",
        folders: &[],
        registry: &[r"HKEY_LOCAL_MACHINE\SOFTWARE\Python\PythonCore"],
    },
    Builtin {
        name: "Steam",
        folders: &[r"%PROGRAMFILES(X86)%\Steam\userdata"],
        registry: &[r"HKEY_CURRENT_USER\Software\Valve\Steam"],
    },
    Builtin {
        name: "Battle.net",
        folders: &[r"%PROGRAMDATA%\Battle.net"],
        registry: &[],
    },
    Builtin {
        name: "Epic Games Launcher",
        folders: &[r"%LOCALAPPDATA%\EpicGamesLauncher", r"%PROGRAMDATA%\Epic"],
        registry: &[],
    },
    Builtin {
        name: "GOG Galaxy",
        folders: &[r"%PROGRAMDATA%\GOG.com"],
        registry: &[],
    },
    Builtin {
        name: "7-Zip",
        folders: &[r"%PROGRAMFILES%\7-Zip"],
        registry: &[],
    },
    Builtin {
        name: "WinRAR",
        folders: &[r"%APPDATA%\WinRAR"],
        registry: &[],
    },
    Builtin {
        name: "Total Commander",
        folders: &[r"%APPDATA%\GHISLER"],
        registry: &[],
    },
    Builtin {
        name: "ShareX",
        folders: &[r"%APPDATA%\ShareX"],
        registry: &[],
    },
    Builtin {
        name: "KeePassXC",
        folders: &[r"%APPDATA%\KeePassXC"],
        registry: &[],
    },
    Builtin {
        name: "OBS Studio",
        folders: &[r"%APPDATA%\obs-studio"],
        registry: &[],
    },
    Builtin {
        name: "VLC",
        folders: &[r"%APPDATA%\vlc"],
        registry: &[],
    },
    Builtin {
        name: "Spotify",
        folders: &[r"%APPDATA%\Spotify"],
        registry: &[],
    },
    Builtin {
        name: "Adobe Reader",
        folders: &[r"%APPDATA%\Adobe\Acrobat\DC"],
        registry: &[],
    },
    Builtin {
        name: "PotPlayer",
        folders: &[r"%APPDATA%\DAUM\PotPlayer"],
        registry: &[],
    },
    Builtin {
        name: "Paint.NET",
        folders: &[r"%APPDATA%\paint.net"],
        registry: &[],
    },
];

/// Every built-in application with its declared resources, in definition order.
pub fn builtin_plugins() -> Vec<(&'static str, ResourceSpec)> {
    BUILTINS
        .iter()
        .map(|b| {
            let spec = ResourceSpec {
                files: Vec::new(),
                folders: b.folders.iter().map(|s| s.to_string()).collect(),
                registry: b.registry.iter().map(|s| s.to_string()).collect(),
            };
            (b.name, spec)
        })
        .collect()
}

/// The built-in set as a catalog.
pub fn builtin_catalog() -> Catalog {
    builtin_plugins()
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect()
}
