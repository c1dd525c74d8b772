pub mod mock_vlc;
