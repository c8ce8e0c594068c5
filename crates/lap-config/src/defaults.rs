/// Commented settings file written on first run
pub const DEFAULT_SETTINGS: &str = "\
[DETECTION]
# Row to scan, as a percentage of the screen height from the top
# 74.17 is row 801 on a 1080p screen and scales with the resolution
CHECK_ROW_PERCENTAGE = 74.17

# First column to scan (0 = left edge, -1 = horizontal center)
X_START_FROM_CENTER = -1

# Column to stop scanning at, exclusive (-1 = right edge)
X_END_AT_EDGE = -1

# Button background color
TARGET_COLOR_R = 59
TARGET_COLOR_G = 1
TARGET_COLOR_B = 0

# Button text color, looked for around a background match
SECONDARY_COLOR_R = 246
SECONDARY_COLOR_G = 175
SECONDARY_COLOR_B = 100

# Allowed difference per color channel (0-255)
TOLERANCE = 10

# Side in pixels of the square searched for the text color
SEARCH_AREA_SIZE = 50

[TIMING]
# Seconds between scans
CHECK_INTERVAL = 1.0

[BEHAVIOR]
# Send Alt+Tab after Enter to leave the game window
ALT_TAB_AFTER_CLICK = false

# Put the cursor back where it was after clicking
RESET_CURSOR_POSITION = true

# Move the cursor onto the selected monitor before clicking
FORCE_CURSOR_TO_MONITOR = false

[DEBUG]
# Write a detailed log to log.txt next to this file
DEBUG_LOGGING = false

[GUI]
# Monitor to watch, by name (Monitor 1, Monitor 2, ...) or number
SELECTED_MONITOR = Monitor 1

# Capture resolution (WIDTHxHEIGHT)
RESOLUTION = 1920x1080

# Kept for compatibility with older settings files
DARK_MODE = false
";
