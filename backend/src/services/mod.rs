pub mod daily_data_service;
pub mod site_service;
pub mod slack;
pub mod stream_check;
pub mod survey_service;
