mod file_scanner;
mod output_directory;
mod path_validator;

pub use file_scanner::{MediaFile, lowercase_extension, scan_media_files};
pub use output_directory::{
    IMAGE_OUTPUT_PREFIX, VIDEO_OUTPUT_PREFIX, create_output_directory, output_directory_name,
    sibling_output_directory,
};
pub use path_validator::{
    ensure_directory_exists, validate_directory_exists, validate_output_outside_input,
};
