mod account_repository_tests;
