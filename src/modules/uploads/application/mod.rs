pub mod intake_service;
