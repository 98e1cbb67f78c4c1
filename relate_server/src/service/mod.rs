pub mod google_client;
