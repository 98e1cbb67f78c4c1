pub mod google_callback;
