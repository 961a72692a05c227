use std::process::Command;
use tracing::{info, warn};

/// Проверить наличие хост-инструментов, через которые работают зонд
/// геометрии и перечисление дисплеев. Проверка рекомендательная: отсутствие
/// инструмента не фатально, факт попадёт в лог и приложение продолжит
/// работу в вырожденном режиме.
pub fn check_environment() {
    info!("Проверка окружения...");

    let geometry_tools = ["xdotool", "swaymsg"];
    let found_geometry = geometry_tools
        .iter()
        .filter(|tool| tool_available(tool))
        .count();

    if found_geometry == 0 {
        warn!("⚠️  Не найден ни один инструмент определения геометрии окна!");
        warn!("   Установите xdotool (X11) или запустите под Sway (swaymsg)");
        warn!("   Команды:");
        warn!("   sudo apt install xdotool   # Debian/Ubuntu");
        warn!("   sudo dnf install xdotool   # Fedora");
    }

    if !tool_available("xrandr") {
        warn!("xrandr не найден - перечисление дисплеев будет пустым");
    }

    info!("Проверка окружения завершена");
}

fn tool_available(tool: &str) -> bool {
    match Command::new(tool).arg("--version").output() {
        Ok(output) => {
            if output.status.success() {
                info!("Найден инструмент: {}", tool);
                true
            } else {
                false
            }
        }
        Err(_) => false,
    }
}
