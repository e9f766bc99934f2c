pub mod adapter_mock_messages;
