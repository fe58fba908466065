pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
}

pub mod detection {
    pub mod domain {
        pub mod detected_face;
        pub mod detection_frame;
        pub mod detection_source;
        pub mod detection_throttle;
        pub mod detector_settings;
    }
    pub mod infrastructure;
}

pub mod overlay {
    pub mod domain {
        pub mod coordinate_mapper;
        pub mod face_overlay_tracker;
        pub mod face_selector;
        pub mod overlay_renderer;
        pub mod overlay_state;
        pub mod overlay_style;
    }
    pub mod infrastructure;
}

pub mod camera {
    pub mod domain {
        pub mod camera;
        pub mod camera_controls;
        pub mod capture_error;
        pub mod destination;
        pub mod permission;
        pub mod photo_store;
    }
    pub mod infrastructure;
}

pub mod state {
    pub mod app_state;
}

pub mod pipeline {
    pub mod capture_photo_use_case;
    pub mod capture_worker;
    pub mod replay_session_use_case;
    pub mod session_logger;
}
