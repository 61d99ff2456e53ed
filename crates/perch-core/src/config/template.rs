/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `perch init` to create a starter config file that users can
/// immediately edit.
pub fn generate_config() -> String {
    r##"# Perch configuration
# Location: ~/.config/perch/config.toml

[overlay]
# Aspect ratio of the overlay window. Sizes snap to resolutions whose
# width and height are both multiples of 5 pixels.
aspect_width = 16
aspect_height = 9
# Widest resolution considered when snapping.
max_width = 10000
# Initial overlay width as a fraction of the screen width.
size_ratio = 0.34
# Bounds for grow/shrink. Each size step moves to the next snapped
# resolution.
min_ratio = 0.05
max_ratio = 1.0
# Repeated adjustments closer together than this (ms) move faster.
accel_window_ms = 50
# Window classes that become the overlay as soon as they open.
auto_classes = ["mpv"]

[status]
# Tick period of the status slot in milliseconds.
tick_ms = 50
# Seconds each message stays on screen before rotating to the next.
rotate_sec = 1.0
# Display time for window size and layout announcements.
announce_sec = 1.0
# Idle spinner glyphs, one per tick.
idle_frames = "/-\\|"

[logging]
# Enable file logging to ~/.config/perch/logs/perch.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation (0 never rotates).
max_file_mb = 10
# Rotated files kept as perch.log.1, perch.log.2, ... (0 to 9).
backups = 1
"##
    .to_string()
}
