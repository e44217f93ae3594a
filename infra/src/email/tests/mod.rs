mod email_sender_tests;
